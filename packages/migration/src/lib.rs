pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, Database, DatabaseConnection};

mod m20260823_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260823_000001_init::Migration)]
    }
}

#[derive(Debug)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Status,
}

/// Run a migration command against an already-connected database.
/// Used by both the CLI and the test suite.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let defined = Migrator::migrations().len();
    let applied = count_applied_migrations(db).await.unwrap_or(0);
    tracing::info!("cmd={command:?} backend={backend:?} defined={defined} applied={applied}");

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            tracing::info!("{command:?} OK");
            Ok(())
        }
        Err(e) => {
            tracing::error!("{command:?} failed: {e}");
            Err(e)
        }
    }
}

/// Count the migrations already applied to the database.
/// Returns 0 if the migration table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
