//! SeaORM adapter for the match store - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::matches::{self, MatchStatus};

pub mod dto;

pub use dto::MatchCreate;

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let match_active = matches::ActiveModel {
        id: NotSet,
        theme: Set(dto.theme),
        status: Set(MatchStatus::Waiting),
        created_at: Set(now),
        completed_at: NotSet,
    };

    match_active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

/// Fetch the match only while it is still joinable.
pub async fn find_waiting_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Id.eq(match_id))
        .filter(matches::Column::Status.eq(MatchStatus::Waiting))
        .one(conn)
        .await
}

/// Oldest waiting match for a theme (matchmaking poll).
pub async fn find_waiting_by_theme<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    theme: &str,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Status.eq(MatchStatus::Waiting))
        .filter(matches::Column::Theme.eq(theme))
        .order_by_asc(matches::Column::CreatedAt)
        .order_by_asc(matches::Column::Id)
        .one(conn)
        .await
}

/// Conditional transition waiting -> in_progress. Returns whether this
/// call performed the transition.
pub async fn start_if_waiting<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = matches::Entity::update_many()
        .col_expr(
            matches::Column::Status,
            Expr::val(MatchStatus::InProgress).into(),
        )
        .filter(matches::Column::Id.eq(match_id))
        .filter(matches::Column::Status.eq(MatchStatus::Waiting))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Finalization guard: a single conditional update that moves the match
/// to completed unless some other caller got there first. Returns whether
/// this call won the transition.
pub async fn complete_if_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    completed_at: time::OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let result = matches::Entity::update_many()
        .col_expr(
            matches::Column::Status,
            Expr::val(MatchStatus::Completed).into(),
        )
        .col_expr(matches::Column::CompletedAt, Expr::val(completed_at).into())
        .filter(matches::Column::Id.eq(match_id))
        .filter(matches::Column::Status.ne(MatchStatus::Completed))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

pub async fn list_recent_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Status.eq(MatchStatus::Completed))
        .order_by_desc(matches::Column::CompletedAt)
        .order_by_desc(matches::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}
