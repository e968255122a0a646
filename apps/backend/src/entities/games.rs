use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Archived finished game (single-player games land here immediately).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "player1_name")]
    pub player1_name: String,
    #[sea_orm(column_name = "player2_name")]
    pub player2_name: String,
    #[sea_orm(column_name = "player1_move")]
    pub player1_move: String,
    #[sea_orm(column_name = "player2_move")]
    pub player2_move: String,
    pub winner: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
