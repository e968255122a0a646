use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self { db_profile: None }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some(profile) = self.db_profile {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(profile).await?;
            Ok(AppState::new(conn))
        } else {
            Ok(AppState::new_without_db())
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_succeeds_without_db_option() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
    }
}
