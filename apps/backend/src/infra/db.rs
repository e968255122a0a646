//! Database bootstrap: connect and bring the schema up to date.

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database for the given profile and apply pending
/// migrations. The single entrypoint used by `StateBuilder`.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db(format!("failed to connect: {e}")))?;

    Migrator::up(&conn, None)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    Ok(conn)
}
