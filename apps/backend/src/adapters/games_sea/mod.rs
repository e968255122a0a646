//! SeaORM adapter for the finished-game archive - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::games;

pub mod dto;

pub use dto::GameCreate;

pub async fn insert_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        player1_name: Set(dto.player1_name),
        player2_name: Set(dto.player2_name),
        player1_move: Set(dto.player1_move),
        player2_move: Set(dto.player2_move),
        winner: Set(dto.winner),
        created_at: Set(now),
    };

    game_active.insert(conn).await
}

/// Newest-first listing with optional substring filter on either player name.
pub async fn list_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
    player: Option<&str>,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    let mut query = games::Entity::find().order_by_desc(games::Column::CreatedAt);

    if let Some(player) = player {
        query = query.filter(
            Condition::any()
                .add(games::Column::Player1Name.contains(player))
                .add(games::Column::Player2Name.contains(player)),
        );
    }

    query.offset(offset).limit(limit).all(conn).await
}

/// Newest-first games where the named player took either seat (exact match).
pub async fn list_recent_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_name: &str,
    limit: u64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(
            Condition::any()
                .add(games::Column::Player1Name.eq(player_name))
                .add(games::Column::Player2Name.eq(player_name)),
        )
        .order_by_desc(games::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    games::Entity::find().count(conn).await
}

/// Per-move row counts for one of the two move columns, for the overall
/// move-distribution stat.
pub async fn count_moves_in_column<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    column: games::Column,
) -> Result<Vec<(String, i64)>, sea_orm::DbErr> {
    games::Entity::find()
        .select_only()
        .column(column)
        .column_as(games::Column::Id.count(), "count")
        .group_by(column)
        .into_tuple::<(String, i64)>()
        .all(conn)
        .await
}
