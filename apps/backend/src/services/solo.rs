//! Single-player rounds against a computer opponent.
//!
//! Solo play has no match lifecycle: one request resolves a full round.
//! The round is archived like any two-player game, with the human in the
//! first seat, and only the human's leaderboard counters move.

use rand::Rng;
use sea_orm::DatabaseTransaction;
use tracing::info;

use crate::domain::rules::{resolve, Move, Outcome};
use crate::error::AppError;
use crate::repos::games::{GameRecord, Winner};
use crate::repos::players::Player;
use crate::repos::{games, leaderboard, players};

/// The opponent's name as it appears in archived games.
pub const COMPUTER_NAME: &str = "Computer";

/// A resolved solo round.
#[derive(Debug, Clone, PartialEq)]
pub struct SoloRound {
    pub player: Player,
    pub player_move: Move,
    pub computer_move: Move,
    /// The human player's outcome.
    pub outcome: Outcome,
    pub game: GameRecord,
}

/// Solo play service.
pub struct SoloService;

impl SoloService {
    pub fn new() -> Self {
        Self
    }

    /// Play one round against a uniformly random computer move.
    pub async fn play(
        &self,
        txn: &DatabaseTransaction,
        player_name: &str,
        mv: Move,
    ) -> Result<SoloRound, AppError> {
        let computer_move = Move::ALL[rand::rng().random_range(0..Move::ALL.len())];
        self.play_against(txn, player_name, mv, computer_move).await
    }

    /// Play one round against a fixed computer move. Split out so tests can
    /// pin the opponent.
    pub async fn play_against(
        &self,
        txn: &DatabaseTransaction,
        player_name: &str,
        mv: Move,
        computer_move: Move,
    ) -> Result<SoloRound, AppError> {
        let player = players::ensure_by_name(txn, player_name).await?;
        let (outcome, _) = resolve(mv, computer_move);

        let game = games::record_game(
            txn,
            &player.name,
            COMPUTER_NAME,
            mv,
            computer_move,
            Some(Winner::from_outcome(outcome)),
        )
        .await?;
        leaderboard::apply_outcome(txn, player.id, &player.name, outcome).await?;

        info!(
            player_id = player.id,
            %mv,
            %computer_move,
            %outcome,
            "Solo round resolved"
        );

        Ok(SoloRound {
            player,
            player_move: mv,
            computer_move,
            outcome,
            game,
        })
    }
}

impl Default for SoloService {
    fn default() -> Self {
        Self::new()
    }
}
