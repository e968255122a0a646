pub mod txn;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Canonical accessor for the database connection held in AppState.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_db_without_db_fails() {
        let app_state = AppState::new_without_db();
        let result = require_db(&app_state);
        assert!(matches!(result, Err(AppError::DbUnavailable)));
    }
}
