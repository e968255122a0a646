//! SeaORM adapter for the leaderboard counters - generic over ConnectionTrait.
//!
//! Counter updates are a single atomic upsert
//! (`INSERT ... ON CONFLICT (player_id) DO UPDATE SET wins = wins + delta`),
//! never a read-modify-write pair, so concurrent games cannot lose updates.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::leaderboard;

/// Atomically apply one game's result to a player's counters. Exactly one
/// of the deltas is expected to be 1 and the others 0.
pub async fn apply_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    player_name: &str,
    wins: i64,
    losses: i64,
    draws: i64,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let row_active = leaderboard::ActiveModel {
        id: NotSet,
        player_id: Set(player_id),
        player_name: Set(player_name.to_string()),
        wins: Set(wins),
        losses: Set(losses),
        draws: Set(draws),
        updated_at: Set(now),
    };

    leaderboard::Entity::insert(row_active)
        .on_conflict(
            OnConflict::column(leaderboard::Column::PlayerId)
                .value(
                    leaderboard::Column::Wins,
                    Expr::col(leaderboard::Column::Wins).add(wins),
                )
                .value(
                    leaderboard::Column::Losses,
                    Expr::col(leaderboard::Column::Losses).add(losses),
                )
                .value(
                    leaderboard::Column::Draws,
                    Expr::col(leaderboard::Column::Draws).add(draws),
                )
                .value(leaderboard::Column::UpdatedAt, Expr::val(now))
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

pub async fn find_by_player_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_name: &str,
) -> Result<Option<leaderboard::Model>, sea_orm::DbErr> {
    leaderboard::Entity::find()
        .filter(leaderboard::Column::PlayerName.eq(player_name))
        .one(conn)
        .await
}

pub async fn top_by_wins<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<leaderboard::Model>, sea_orm::DbErr> {
    leaderboard::Entity::find()
        .order_by_desc(leaderboard::Column::Wins)
        .order_by_asc(leaderboard::Column::PlayerName)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    leaderboard::Entity::find().count(conn).await
}
