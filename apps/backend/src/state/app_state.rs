use sea_orm::DatabaseConnection;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Some(db) }
    }

    pub fn new_without_db() -> Self {
        Self { db: None }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
