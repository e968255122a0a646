//! Two-player match lifecycle orchestration.
//!
//! A match moves `waiting -> in_progress -> completed` and never backwards.
//! Every transition here is guarded by a conditional update in the repos
//! layer, so concurrent joins and concurrent move submissions settle on a
//! single winner of each transition regardless of interleaving.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use crate::domain::rules::{resolve, Move, Outcome};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::infra::db_errors;
use crate::repos::games::Winner;
use crate::repos::matches::Match;
use crate::repos::participants::ParticipantWithName;
use crate::repos::players::Player;
use crate::repos::{games, leaderboard, matches, participants, players};

/// A match together with its participants, for presentation reads.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDetail {
    pub game: Match,
    pub participants: Vec<ParticipantWithName>,
}

/// One participant's final line in a completed match.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerResult {
    pub player_id: i64,
    pub player_name: String,
    pub mv: Move,
    pub outcome: Outcome,
}

/// What a move submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    /// Move stored; the opponent has not played yet.
    Recorded,
    /// Both moves are in and the match is completed.
    Complete { results: Vec<PlayerResult> },
}

/// Match flow service.
pub struct MatchFlowService;

impl MatchFlowService {
    pub fn new() -> Self {
        Self
    }

    /// Create a match in `waiting` with the creator as its first
    /// participant. The creator's name is resolved to a player identity,
    /// creating one on first use.
    pub async fn create_match(
        &self,
        txn: &DatabaseTransaction,
        theme: &str,
        player_name: &str,
    ) -> Result<(Match, Player), AppError> {
        let player = players::ensure_by_name(txn, player_name).await?;
        let game = matches::create_match(txn, theme).await?;
        participants::add(txn, game.id, player.id).await?;

        info!(match_id = game.id, player_id = player.id, theme, "Match created");
        Ok((game, player))
    }

    /// Join a waiting match as its second participant and start it.
    ///
    /// The creator joining their own waiting match is a no-op: the match
    /// stays in `waiting`. When two players race for the open seat, the
    /// `waiting -> in_progress` guard admits exactly one; the loser's
    /// participant row is removed and the join fails as not found, the
    /// same answer a late joiner gets.
    pub async fn join_match(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        player_name: &str,
    ) -> Result<(Match, Player), AppError> {
        let player = players::ensure_by_name(txn, player_name).await?;
        matches::require_waiting(txn, match_id).await?;

        let inserted = participants::add(txn, match_id, player.id).await?;
        if inserted {
            let started = matches::start_if_waiting(txn, match_id).await?;
            if !started {
                participants::remove(txn, match_id, player.id).await?;
                return Err(DomainError::not_found(
                    NotFoundKind::Match,
                    format!("Match {match_id} not found or not available"),
                )
                .into());
            }
            info!(match_id, player_id = player.id, "Match joined and started");
        } else {
            debug!(match_id, player_id = player.id, "Join was a rejoin, no-op");
        }

        let game = matches::require_match(txn, match_id).await?;
        Ok((game, player))
    }

    /// Submit a move for one participant of an in-progress match.
    ///
    /// A participant's move is immutable once stored; resubmitting while
    /// the opponent is still pending is a conflict, and the stored move
    /// stands. Once both moves are present a repeat submission attempts
    /// finalization instead: two truly concurrent first submissions can
    /// each commit without seeing the other's move (both return
    /// `Recorded`), and the retry is what drives such a match to
    /// completion. Whichever submission wins the completion guard
    /// resolves both outcomes, archives the game, and updates the
    /// leaderboard; everyone else reads the stored result. Submitting to
    /// an already completed match returns the stored result without
    /// changing anything.
    pub async fn submit_move(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        player_id: i64,
        mv: Move,
    ) -> Result<PlayOutcome, AppError> {
        let game = matches::require_match(txn, match_id).await?;
        if game.is_completed() {
            debug!(match_id, player_id, "Move submitted to completed match");
            let results = self.stored_results(txn, match_id).await?;
            return Ok(PlayOutcome::Complete { results });
        }

        players::require_player(txn, player_id).await?;
        let me = participants::require(txn, match_id, player_id).await?;
        let replay = me.mv.is_some();
        if !replay {
            participants::set_move(txn, match_id, player_id, mv).await?;
            debug!(match_id, player_id, "Move recorded");
        }

        let all = participants::list_with_names(txn, match_id).await?;
        let ready = all.len() == 2 && all.iter().all(|p| p.participant.mv.is_some());
        if !ready {
            if replay {
                return Err(DomainError::conflict(
                    ConflictKind::MoveAlreadySubmitted,
                    format!("Player {player_id} already submitted a move in match {match_id}"),
                )
                .into());
            }
            return Ok(PlayOutcome::Recorded);
        }

        let finalized = matches::complete_if_pending(
            txn,
            match_id,
            time::OffsetDateTime::now_utc(),
        )
        .await?;
        if !finalized {
            // Lost the completion race: the winner has already written
            // every outcome.
            let results = self.stored_results(txn, match_id).await?;
            return Ok(PlayOutcome::Complete { results });
        }

        let results = self.finalize(txn, match_id, &all).await?;
        Ok(PlayOutcome::Complete { results })
    }

    /// Resolve both outcomes, persist them, archive the game and update the
    /// leaderboard. Runs exactly once per match, in the submission that won
    /// the completion guard.
    async fn finalize(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        all: &[ParticipantWithName],
    ) -> Result<Vec<PlayerResult>, AppError> {
        // Participant rows come back ordered by insertion, creator first.
        let (p1, p2) = match all {
            [p1, p2] => (p1, p2),
            _ => {
                return Err(db_errors::corrupt(format!(
                    "match {match_id} completed with {} participants",
                    all.len()
                ))
                .into())
            }
        };
        let (m1, m2) = match (p1.participant.mv, p2.participant.mv) {
            (Some(m1), Some(m2)) => (m1, m2),
            _ => {
                return Err(db_errors::corrupt(format!(
                    "match {match_id} completed with a missing move"
                ))
                .into())
            }
        };

        let (o1, o2) = resolve(m1, m2);
        participants::set_outcome(txn, p1.participant.id, o1).await?;
        participants::set_outcome(txn, p2.participant.id, o2).await?;

        games::record_game(
            txn,
            &p1.player_name,
            &p2.player_name,
            m1,
            m2,
            Some(Winner::from_outcome(o1)),
        )
        .await?;
        leaderboard::apply_outcome(txn, p1.participant.player_id, &p1.player_name, o1).await?;
        leaderboard::apply_outcome(txn, p2.participant.player_id, &p2.player_name, o2).await?;

        info!(
            match_id,
            winner = %Winner::from_outcome(o1),
            "Match completed"
        );

        Ok(vec![
            PlayerResult {
                player_id: p1.participant.player_id,
                player_name: p1.player_name.clone(),
                mv: m1,
                outcome: o1,
            },
            PlayerResult {
                player_id: p2.participant.player_id,
                player_name: p2.player_name.clone(),
                mv: m2,
                outcome: o2,
            },
        ])
    }

    /// Read back the persisted results of a completed match.
    async fn stored_results(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<Vec<PlayerResult>, AppError> {
        let all = participants::list_with_names(txn, match_id).await?;
        all.into_iter()
            .map(|p| {
                let (mv, outcome) = match (p.participant.mv, p.participant.outcome) {
                    (Some(mv), Some(outcome)) => (mv, outcome),
                    _ => {
                        return Err(db_errors::corrupt(format!(
                            "participant {} of completed match {match_id} has no result",
                            p.participant.id
                        ))
                        .into())
                    }
                };
                Ok(PlayerResult {
                    player_id: p.participant.player_id,
                    player_name: p.player_name,
                    mv,
                    outcome,
                })
            })
            .collect()
    }

    /// A match with its participants, any status.
    pub async fn match_detail(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<MatchDetail, AppError> {
        let game = matches::require_match(txn, match_id).await?;
        let participants = participants::list_with_names(txn, match_id).await?;
        Ok(MatchDetail { game, participants })
    }

    /// The oldest waiting match for a theme, if any.
    pub async fn find_waiting_by_theme(
        &self,
        txn: &DatabaseTransaction,
        theme: &str,
    ) -> Result<Option<MatchDetail>, AppError> {
        let Some(game) = matches::find_waiting_by_theme(txn, theme).await? else {
            return Ok(None);
        };
        let participants = participants::list_with_names(txn, game.id).await?;
        Ok(Some(MatchDetail { game, participants }))
    }

    /// Recently completed matches with their participants, newest first.
    pub async fn recent_matches(
        &self,
        txn: &DatabaseTransaction,
        limit: u64,
    ) -> Result<Vec<MatchDetail>, AppError> {
        let recent = matches::recent_completed(txn, limit).await?;
        let mut out = Vec::with_capacity(recent.len());
        for game in recent {
            let participants = participants::list_with_names(txn, game.id).await?;
            out.push(MatchDetail { game, participants });
        }
        Ok(out)
    }
}

impl Default for MatchFlowService {
    fn default() -> Self {
        Self::new()
    }
}
