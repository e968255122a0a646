//! Shared test harness: an in-memory SQLite database with the full
//! schema applied, wrapped in the application state the backend uses.

use backend::state::app_state::AppState;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

/// A fresh application state backed by an in-memory SQLite database.
///
/// One connection only: an in-memory SQLite database exists per
/// connection, so a pool would hand out empty databases.
pub async fn test_state() -> AppState {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    AppState::new(db)
}
