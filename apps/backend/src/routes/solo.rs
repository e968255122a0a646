//! Single-player route.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::rules::Move;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::solo::SoloService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct SoloRequest {
    player_name: Option<String>,
    #[serde(rename = "move")]
    mv: Option<String>,
}

#[derive(Debug, Serialize)]
struct SoloResponse {
    player_id: i64,
    player_name: String,
    player_move: String,
    computer_move: String,
    outcome: String,
    game_id: i64,
}

/// POST /api/solo
async fn solo(
    app_state: web::Data<AppState>,
    body: web::Json<SoloRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let player_name = req
        .player_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "player_name is required"))?;
    let mv: Move = req
        .mv
        .as_deref()
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "move is required"))?
        .parse()
        .map_err(|e| AppError::invalid(ErrorCode::InvalidMove, format!("{e}")))?;

    let round = with_txn(&app_state, |txn| {
        Box::pin(async move { SoloService::new().play(txn, &player_name, mv).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(SoloResponse {
        player_id: round.player.id,
        player_name: round.player.name,
        player_move: round.player_move.as_str().to_string(),
        computer_move: round.computer_move.as_str().to_string(),
        outcome: round.outcome.as_str().to_string(),
        game_id: round.game.id,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/solo").route(web::post().to(solo)));
}
