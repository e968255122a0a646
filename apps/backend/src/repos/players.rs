//! Player directory repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub created_at: time::OffsetDateTime,
}

/// Resolve a name to a player identity, creating it on first use.
/// The same name always resolves to the same identity.
pub async fn ensure_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Player, DomainError> {
    let (player, _inserted) = players_adapter::ensure_player_by_name(conn, name).await?;
    Ok(Player::from(player))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

/// Find player by ID or return error if not found.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
    })
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
