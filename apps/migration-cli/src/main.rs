use clap::{Parser, ValueEnum};
use migration::{Database, MigrationCommand};

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | status
    command: String,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

/// Build a Postgres URL from the same environment variables the backend
/// uses. The test database name must end with "_test" so a mistyped env
/// can never point a destructive command at production data.
fn db_url(env: &Env) -> Result<String, String> {
    let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;
    let db_name = match env {
        Env::Prod => must_var("PROD_DB")?,
        Env::Test => {
            let name = must_var("TEST_DB")?;
            if !name.ends_with("_test") {
                return Err(format!(
                    "Test environment requires database name ending with '_test', got: '{name}'"
                ));
            }
            name
        }
    };

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn must_var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("Required environment variable '{name}' is not set"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command.as_str() {
        "up" => MigrationCommand::Up,
        "down" => MigrationCommand::Down,
        "fresh" => MigrationCommand::Fresh,
        "reset" => MigrationCommand::Reset,
        "status" => MigrationCommand::Status,
        other => {
            eprintln!("Unknown command: {other}. Use: up | down | fresh | reset | status");
            std::process::exit(2);
        }
    };

    let url = match db_url(&args.env) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
