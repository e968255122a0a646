//! Move submission route for two-player matches.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::rules::Move;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::match_flow::{MatchFlowService, PlayOutcome, PlayerResult};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct PlayRequest {
    match_id: Option<i64>,
    player_id: Option<i64>,
    #[serde(rename = "move")]
    mv: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResultBody {
    player_id: i64,
    player_name: String,
    r#move: String,
    outcome: String,
}

#[derive(Debug, Serialize)]
struct PlayResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<Vec<ResultBody>>,
}

fn result_body(r: PlayerResult) -> ResultBody {
    ResultBody {
        player_id: r.player_id,
        player_name: r.player_name,
        r#move: r.mv.as_str().to_string(),
        outcome: r.outcome.as_str().to_string(),
    }
}

/// POST /api/play
///
/// The move is validated before anything touches the database, so an
/// invalid move can never leave a half-submitted state behind.
async fn play(
    app_state: web::Data<AppState>,
    body: web::Json<PlayRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let match_id = req
        .match_id
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "match_id is required"))?;
    let player_id = req
        .player_id
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "player_id is required"))?;
    let mv: Move = req
        .mv
        .as_deref()
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "move is required"))?
        .parse()
        .map_err(|e| AppError::invalid(ErrorCode::InvalidMove, format!("{e}")))?;

    let outcome = with_txn(&app_state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, player_id, mv)
                .await
        })
    })
    .await?;

    let response = match outcome {
        PlayOutcome::Recorded => PlayResponse {
            status: "waiting_for_opponent",
            results: None,
        },
        PlayOutcome::Complete { results } => PlayResponse {
            status: "completed",
            results: Some(results.into_iter().map(result_body).collect()),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/play").route(web::post().to(play)));
}
