//! SeaORM adapter for the participant store - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};

use crate::entities::{match_players, players};

pub mod dto;

pub use dto::ParticipantCreate;

/// Idempotent insert keyed on (match_id, player_id). Returns whether a
/// new participant row was actually created.
pub async fn add_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let participant_active = match_players::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        player_id: Set(dto.player_id),
        mv: NotSet,
        outcome: NotSet,
        created_at: Set(now),
    };

    let rows = match_players::Entity::insert(participant_active)
        .on_conflict(
            OnConflict::columns([
                match_players::Column::MatchId,
                match_players::Column::PlayerId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(rows == 1)
}

pub async fn remove_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<(), sea_orm::DbErr> {
    match_players::Entity::delete_many()
        .filter(match_players::Column::MatchId.eq(match_id))
        .filter(match_players::Column::PlayerId.eq(player_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn find_by_match_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<Option<match_players::Model>, sea_orm::DbErr> {
    match_players::Entity::find()
        .filter(match_players::Column::MatchId.eq(match_id))
        .filter(match_players::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

pub async fn set_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
    mv: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = match_players::Entity::update_many()
        .col_expr(match_players::Column::Mv, Expr::val(mv).into())
        .filter(match_players::Column::MatchId.eq(match_id))
        .filter(match_players::Column::PlayerId.eq(player_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn set_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
    outcome: &str,
) -> Result<(), sea_orm::DbErr> {
    match_players::Entity::update_many()
        .col_expr(match_players::Column::Outcome, Expr::val(outcome).into())
        .filter(match_players::Column::Id.eq(participant_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Participants in join order (insertion order by id).
pub async fn list_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<match_players::Model>, sea_orm::DbErr> {
    match_players::Entity::find()
        .filter(match_players::Column::MatchId.eq(match_id))
        .order_by_asc(match_players::Column::Id)
        .all(conn)
        .await
}

/// Participants with their player rows resolved, in join order.
pub async fn list_with_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<(match_players::Model, Option<players::Model>)>, sea_orm::DbErr> {
    match_players::Entity::find()
        .filter(match_players::Column::MatchId.eq(match_id))
        .order_by_asc(match_players::Column::Id)
        .find_also_related(players::Entity)
        .all(conn)
        .await
}
