/// Insert payload for a new match.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub theme: String,
}

impl MatchCreate {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
        }
    }
}
