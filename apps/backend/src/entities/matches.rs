use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Match lifecycle status. Forward-only: waiting -> in_progress -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MatchStatus {
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl MatchStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Waiting => "waiting",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub theme: String,
    pub status: MatchStatus,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::match_players::Entity")]
    MatchPlayers,
}

impl Related<super::match_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
