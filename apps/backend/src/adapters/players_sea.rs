//! SeaORM adapter for the player directory - generic over ConnectionTrait.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::players;

/// Upsert-by-name: insert if the name is new, otherwise reuse the
/// existing identity. Returns the row and whether it was inserted.
pub async fn ensure_player_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<(players::Model, bool), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let player_active = players::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(now),
    };

    let rows = players::Entity::insert(player_active)
        .on_conflict(
            OnConflict::column(players::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let inserted = rows == 1;
    let player = players::Entity::find()
        .filter(players::Column::Name.eq(name))
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("players.name not found".to_string()))?;

    Ok((player, inserted))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Name.eq(name))
        .one(conn)
        .await
}
