//! Finished-game archive repository functions.

use std::fmt;
use std::str::FromStr;

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
use crate::domain::rules::{Move, Outcome};
use crate::entities::games;
use crate::errors::domain::DomainError;
use crate::infra::db_errors;

/// Which seat won an archived game. `None` in the record means the game
/// was saved without a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

impl Winner {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Winner::Player1 => "player1",
            Winner::Player2 => "player2",
            Winner::Tie => "tie",
        }
    }

    /// The verdict implied by player1's outcome.
    pub const fn from_outcome(outcome: Outcome) -> Winner {
        match outcome {
            Outcome::Win => Winner::Player1,
            Outcome::Lose => Winner::Player2,
            Outcome::Draw => Winner::Tie,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWinnerError(pub String);

impl fmt::Display for ParseWinnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid winner: {:?} (expected player1, player2 or tie)",
            self.0
        )
    }
}

impl std::error::Error for ParseWinnerError {}

impl FromStr for Winner {
    type Err = ParseWinnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player1" => Ok(Winner::Player1),
            "player2" => Ok(Winner::Player2),
            "tie" => Ok(Winner::Tie),
            other => Err(ParseWinnerError(other.to_string())),
        }
    }
}

/// Archived game domain model
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: i64,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_move: Move,
    pub player2_move: Move,
    pub winner: Option<Winner>,
    pub created_at: time::OffsetDateTime,
}

pub async fn record_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player1_name: &str,
    player2_name: &str,
    player1_move: Move,
    player2_move: Move,
    winner: Option<Winner>,
) -> Result<GameRecord, DomainError> {
    let dto = games_adapter::GameCreate {
        player1_name: player1_name.to_string(),
        player2_name: player2_name.to_string(),
        player1_move: player1_move.as_str().to_string(),
        player2_move: player2_move.as_str().to_string(),
        winner: winner.map(|w| w.as_str().to_string()),
    };
    let model = games_adapter::insert_game(conn, dto).await?;
    GameRecord::try_from(model)
}

pub async fn list_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
    player: Option<&str>,
) -> Result<Vec<GameRecord>, DomainError> {
    let models = games_adapter::list_games(conn, limit, offset, player).await?;
    models.into_iter().map(GameRecord::try_from).collect()
}

pub async fn recent_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_name: &str,
    limit: u64,
) -> Result<Vec<GameRecord>, DomainError> {
    let models = games_adapter::list_recent_for_player(conn, player_name, limit).await?;
    models.into_iter().map(GameRecord::try_from).collect()
}

pub async fn count_games<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(games_adapter::count_games(conn).await?)
}

/// Combined per-move counts over both seats of every archived game.
pub async fn move_counts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(Move, i64)>, DomainError> {
    let mut totals = Move::ALL.map(|m| (m, 0i64));

    for column in [games::Column::Player1Move, games::Column::Player2Move] {
        for (raw, count) in games_adapter::count_moves_in_column(conn, column).await? {
            let mv = raw
                .parse::<Move>()
                .map_err(|e| db_errors::corrupt(format!("games.{column:?}: {e}")))?;
            totals[mv as usize].1 += count;
        }
    }

    Ok(totals.to_vec())
}

impl TryFrom<games::Model> for GameRecord {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let parse_move = |raw: &str| {
            raw.parse::<Move>()
                .map_err(|e| db_errors::corrupt(format!("game {}: {e}", model.id)))
        };
        let winner = model
            .winner
            .as_deref()
            .map(str::parse::<Winner>)
            .transpose()
            .map_err(|e| db_errors::corrupt(format!("game {}: {e}", model.id)))?;

        Ok(Self {
            id: model.id,
            player1_move: parse_move(&model.player1_move)?,
            player2_move: parse_move(&model.player2_move)?,
            player1_name: model.player1_name,
            player2_name: model.player2_name,
            winner,
            created_at: model.created_at,
        })
    }
}
