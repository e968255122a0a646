//! Aggregate and per-player statistics reads.

use sea_orm::ConnectionTrait;

use crate::domain::rules::Move;
use crate::error::AppError;
use crate::repos::games::GameRecord;
use crate::repos::leaderboard::LeaderboardEntry;
use crate::repos::{games, leaderboard};

const RECENT_GAMES_LIMIT: u64 = 5;

/// One player's cumulative record plus their latest archived games.
/// `entry` is `None` for a player who has never finished a game.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub entry: Option<LeaderboardEntry>,
    pub recent_games: Vec<GameRecord>,
}

/// How often one move was thrown, across both seats of every game.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveShare {
    pub mv: Move,
    pub count: i64,
    /// Share of all thrown moves, one decimal place.
    pub percentage: f64,
}

/// Site-wide totals.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub total_games: u64,
    pub total_players: u64,
    pub move_distribution: Vec<MoveShare>,
}

pub async fn player_stats(
    conn: &(impl ConnectionTrait + Send + Sync),
    player_name: &str,
) -> Result<PlayerStats, AppError> {
    let entry = leaderboard::find_by_name(conn, player_name).await?;
    let recent_games = games::recent_for_player(conn, player_name, RECENT_GAMES_LIMIT).await?;
    Ok(PlayerStats {
        entry,
        recent_games,
    })
}

pub async fn overall(conn: &(impl ConnectionTrait + Send + Sync)) -> Result<OverallStats, AppError> {
    let total_games = games::count_games(conn).await?;
    let total_players = leaderboard::count_players(conn).await?;

    let counts = games::move_counts(conn).await?;
    let total_moves: i64 = counts.iter().map(|(_, c)| c).sum();
    let move_distribution = counts
        .into_iter()
        .map(|(mv, count)| MoveShare {
            mv,
            count,
            percentage: share(count, total_moves),
        })
        .collect();

    Ok(OverallStats {
        total_games,
        total_players,
        move_distribution,
    })
}

fn share(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::share;

    #[test]
    fn share_handles_empty_archive() {
        assert_eq!(share(0, 0), 0.0);
        assert_eq!(share(1, 4), 25.0);
        assert_eq!(share(1, 6), 16.7);
    }
}
