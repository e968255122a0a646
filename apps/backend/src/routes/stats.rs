//! Statistics routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::repos::games::GameRecord;
use crate::services::stats;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct StatsQuery {
    player: Option<String>,
}

#[derive(Debug, Serialize)]
struct RecentGameBody {
    id: i64,
    player1_name: String,
    player2_name: String,
    player1_move: String,
    player2_move: String,
    winner: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<GameRecord> for RecentGameBody {
    fn from(g: GameRecord) -> Self {
        Self {
            id: g.id,
            player1_name: g.player1_name,
            player2_name: g.player2_name,
            player1_move: g.player1_move.as_str().to_string(),
            player2_move: g.player2_move.as_str().to_string(),
            winner: g.winner.map(|w| w.as_str().to_string()),
            created_at: g.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlayerStatsResponse {
    player_name: String,
    wins: i64,
    losses: i64,
    draws: i64,
    total_games: i64,
    recent_games: Vec<RecentGameBody>,
}

#[derive(Debug, Serialize)]
struct MoveShareBody {
    r#move: String,
    count: i64,
    percentage: f64,
}

#[derive(Debug, Serialize)]
struct OverallStatsResponse {
    total_games: u64,
    total_players: u64,
    move_distribution: Vec<MoveShareBody>,
}

/// GET /api/stats, optionally scoped with ?player=NAME.
///
/// A player nobody has heard of still gets a response, with zeroed
/// counters and no games.
async fn get_stats(
    app_state: web::Data<AppState>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    if let Some(player_name) = query.into_inner().player {
        let stats = stats::player_stats(db, &player_name).await?;
        let (wins, losses, draws) = stats
            .entry
            .map(|e| (e.wins, e.losses, e.draws))
            .unwrap_or((0, 0, 0));
        return Ok(HttpResponse::Ok().json(PlayerStatsResponse {
            player_name,
            wins,
            losses,
            draws,
            total_games: wins + losses + draws,
            recent_games: stats
                .recent_games
                .into_iter()
                .map(RecentGameBody::from)
                .collect(),
        }));
    }

    let overall = stats::overall(db).await?;
    Ok(HttpResponse::Ok().json(OverallStatsResponse {
        total_games: overall.total_games,
        total_players: overall.total_players,
        move_distribution: overall
            .move_distribution
            .into_iter()
            .map(|s| MoveShareBody {
                r#move: s.mv.as_str().to_string(),
                count: s.count,
                percentage: s.percentage,
            })
            .collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/stats").route(web::get().to(get_stats)));
}
