//! Leaderboard repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::leaderboard_sea as leaderboard_adapter;
use crate::domain::rules::Outcome;
use crate::entities::leaderboard;
use crate::errors::domain::DomainError;

/// Leaderboard domain model: cumulative counters for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub player_id: i64,
    pub player_name: String,
    pub wins: i64,
    pub losses: i64,
    pub draws: i64,
    pub updated_at: time::OffsetDateTime,
}

impl LeaderboardEntry {
    pub fn total_games(&self) -> i64 {
        self.wins + self.losses + self.draws
    }
}

/// Bump the counter matching `outcome` by one, atomically.
pub async fn apply_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    player_name: &str,
    outcome: Outcome,
) -> Result<(), DomainError> {
    let (wins, losses, draws) = match outcome {
        Outcome::Win => (1, 0, 0),
        Outcome::Lose => (0, 1, 0),
        Outcome::Draw => (0, 0, 1),
    };
    leaderboard_adapter::apply_result(conn, player_id, player_name, wins, losses, draws).await?;
    Ok(())
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_name: &str,
) -> Result<Option<LeaderboardEntry>, DomainError> {
    let model = leaderboard_adapter::find_by_player_name(conn, player_name).await?;
    Ok(model.map(LeaderboardEntry::from))
}

pub async fn top<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<LeaderboardEntry>, DomainError> {
    let models = leaderboard_adapter::top_by_wins(conn, limit).await?;
    Ok(models.into_iter().map(LeaderboardEntry::from).collect())
}

pub async fn count_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, DomainError> {
    Ok(leaderboard_adapter::count_players(conn).await?)
}

impl From<leaderboard::Model> for LeaderboardEntry {
    fn from(model: leaderboard::Model) -> Self {
        Self {
            player_id: model.player_id,
            player_name: model.player_name,
            wins: model.wins,
            losses: model.losses,
            draws: model.draws,
            updated_at: model.updated_at,
        }
    }
}
