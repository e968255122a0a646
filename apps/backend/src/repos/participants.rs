//! Participant repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::match_players_sea as participants_adapter;
use crate::adapters::match_players_sea::ParticipantCreate;
use crate::domain::rules::{Move, Outcome};
use crate::entities::match_players;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors;

/// Participant domain model: one player's membership, move and outcome
/// within a single match.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub mv: Option<Move>,
    pub outcome: Option<Outcome>,
}

/// Participant plus its resolved player name, for presentation reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantWithName {
    pub participant: Participant,
    pub player_name: String,
}

/// Idempotent insert. Returns whether a new participant row was created
/// (false means the player was already in the match).
pub async fn add<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<bool, DomainError> {
    Ok(participants_adapter::add_participant(conn, ParticipantCreate::new(match_id, player_id))
        .await?)
}

pub async fn remove<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<(), DomainError> {
    participants_adapter::remove_participant(conn, match_id, player_id).await?;
    Ok(())
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<Option<Participant>, DomainError> {
    let model = participants_adapter::find_by_match_and_player(conn, match_id, player_id).await?;
    model.map(Participant::try_from).transpose()
}

/// Find the participant row or fail: submitting a move requires the
/// player to already be in the match.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<Participant, DomainError> {
    find(conn, match_id, player_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Participant,
            format!("Player {player_id} is not a participant of match {match_id}"),
        )
    })
}

pub async fn set_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
    mv: Move,
) -> Result<(), DomainError> {
    let rows = participants_adapter::set_move(conn, match_id, player_id, mv.as_str()).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Participant,
            format!("Player {player_id} is not a participant of match {match_id}"),
        ));
    }
    Ok(())
}

pub async fn set_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
    outcome: Outcome,
) -> Result<(), DomainError> {
    participants_adapter::set_outcome(conn, participant_id, outcome.as_str()).await?;
    Ok(())
}

pub async fn list_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<Participant>, DomainError> {
    let models = participants_adapter::list_by_match(conn, match_id).await?;
    models.into_iter().map(Participant::try_from).collect()
}

pub async fn list_with_names<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<ParticipantWithName>, DomainError> {
    let rows = participants_adapter::list_with_players(conn, match_id).await?;
    rows.into_iter()
        .map(|(participant, player)| {
            let player_name = player.map(|p| p.name).ok_or_else(|| {
                db_errors::corrupt(format!(
                    "participant {} has no player row",
                    participant.id
                ))
            })?;
            Ok(ParticipantWithName {
                participant: Participant::try_from(participant)?,
                player_name,
            })
        })
        .collect()
}

// Conversions between SeaORM models and domain models. Stored move and
// outcome strings were validated on the way in; a parse failure here is
// corruption, not user error.

impl TryFrom<match_players::Model> for Participant {
    type Error = DomainError;

    fn try_from(model: match_players::Model) -> Result<Self, Self::Error> {
        let mv = model
            .mv
            .as_deref()
            .map(str::parse::<Move>)
            .transpose()
            .map_err(|e| db_errors::corrupt(format!("participant {}: {e}", model.id)))?;
        let outcome = model
            .outcome
            .as_deref()
            .map(str::parse::<Outcome>)
            .transpose()
            .map_err(|e| db_errors::corrupt(format!("participant {}: {e}", model.id)))?;

        Ok(Self {
            id: model.id,
            match_id: model.match_id,
            player_id: model.player_id,
            mv,
            outcome,
        })
    }
}
