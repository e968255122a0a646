//! Leaderboard reads.

use sea_orm::ConnectionTrait;

use crate::error::AppError;
use crate::repos::leaderboard;
use crate::repos::leaderboard::LeaderboardEntry;

/// A leaderboard entry with its derived presentation fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub rank: u64,
    pub entry: LeaderboardEntry,
    pub total_games: i64,
    /// Wins as a share of total games, one decimal place. Zero when the
    /// player has no games.
    pub win_percentage: f64,
}

/// Top players ordered by wins descending, ties broken by name.
pub async fn top(conn: &(impl ConnectionTrait + Send + Sync), limit: u64) -> Result<Vec<RankedEntry>, AppError> {
    let entries = leaderboard::top(conn, limit).await?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let total_games = entry.total_games();
            RankedEntry {
                rank: i as u64 + 1,
                win_percentage: win_percentage(entry.wins, total_games),
                total_games,
                entry,
            }
        })
        .collect())
}

fn win_percentage(wins: i64, total_games: i64) -> f64 {
    if total_games == 0 {
        return 0.0;
    }
    let pct = wins as f64 / total_games as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::win_percentage;

    #[test]
    fn win_percentage_rounds_to_one_decimal() {
        assert_eq!(win_percentage(0, 0), 0.0);
        assert_eq!(win_percentage(1, 2), 50.0);
        assert_eq!(win_percentage(1, 3), 33.3);
        assert_eq!(win_percentage(2, 3), 66.7);
        assert_eq!(win_percentage(3, 3), 100.0);
    }
}
