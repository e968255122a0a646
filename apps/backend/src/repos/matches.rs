//! Match repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::matches_sea as matches_adapter;
use crate::entities::matches;
use crate::entities::matches::MatchStatus;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Match domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub theme: String,
    pub status: MatchStatus,
    pub created_at: time::OffsetDateTime,
    pub completed_at: Option<time::OffsetDateTime>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    theme: &str,
) -> Result<Match, DomainError> {
    let model = matches_adapter::create_match(conn, matches_adapter::MatchCreate::new(theme)).await?;
    Ok(Match::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let model = matches_adapter::find_by_id(conn, match_id).await?;
    Ok(model.map(Match::from))
}

/// Find match by ID or return error if not found.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    find_by_id(conn, match_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
    })
}

/// The match, but only while it is still joinable. A match that is
/// in progress or completed reads as not found, which also blocks a
/// third participant.
pub async fn require_waiting<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    matches_adapter::find_waiting_by_id(conn, match_id)
        .await?
        .map(Match::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Match,
                format!("Match {match_id} not found or not available"),
            )
        })
}

pub async fn find_waiting_by_theme<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    theme: &str,
) -> Result<Option<Match>, DomainError> {
    let model = matches_adapter::find_waiting_by_theme(conn, theme).await?;
    Ok(model.map(Match::from))
}

/// waiting -> in_progress, guarded on the current status. Returns whether
/// this call performed the transition.
pub async fn start_if_waiting<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<bool, DomainError> {
    Ok(matches_adapter::start_if_waiting(conn, match_id).await?)
}

/// The finalization critical section: one conditional update to
/// completed. Exactly one caller per match observes `true`.
pub async fn complete_if_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    completed_at: time::OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(matches_adapter::complete_if_pending(conn, match_id, completed_at).await?)
}

pub async fn recent_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<Match>, DomainError> {
    let models = matches_adapter::list_recent_completed(conn, limit).await?;
    Ok(models.into_iter().map(Match::from).collect())
}

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            id: model.id,
            theme: model.theme,
            status: model.status,
            created_at: model.created_at,
            completed_at: model.completed_at,
        }
    }
}
