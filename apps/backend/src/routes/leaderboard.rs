//! Leaderboard route.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::services::leaderboard;
use crate::state::app_state::AppState;

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<u64>,
}

#[derive(Debug, Serialize)]
struct EntryBody {
    rank: u64,
    player_name: String,
    wins: i64,
    losses: i64,
    draws: i64,
    total_games: i64,
    win_percentage: f64,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    leaderboard: Vec<EntryBody>,
}

/// GET /api/leaderboard
async fn leaderboard(
    app_state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let db = require_db(&app_state)?;

    let ranked = leaderboard::top(db, limit).await?;
    let leaderboard = ranked
        .into_iter()
        .map(|r| EntryBody {
            rank: r.rank,
            player_name: r.entry.player_name,
            wins: r.entry.wins,
            losses: r.entry.losses,
            draws: r.entry.draws,
            total_games: r.total_games,
            win_percentage: r.win_percentage,
        })
        .collect();

    Ok(HttpResponse::Ok().json(LeaderboardResponse { leaderboard }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/leaderboard").route(web::get().to(leaderboard)));
}
