//! Archived-game HTTP routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::rules::Move;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::games::{GameRecord, Winner};
use crate::repos::games;
use crate::state::app_state::AppState;

const LIST_DEFAULT_LIMIT: u64 = 20;
const LIST_MAX_LIMIT: u64 = 100;

#[derive(Debug, Serialize)]
struct GameBody {
    id: i64,
    player1_name: String,
    player2_name: String,
    player1_move: String,
    player2_move: String,
    winner: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<GameRecord> for GameBody {
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

#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<u64>,
    offset: Option<u64>,
    player: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    games: Vec<GameBody>,
    total: u64,
}

/// GET /api/games
async fn list(
    app_state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let limit = query.limit.unwrap_or(LIST_DEFAULT_LIMIT).min(LIST_MAX_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let db = require_db(&app_state)?;
    let records = games::list_games(db, limit, offset, query.player.as_deref()).await?;
    let total = games::count_games(db).await?;

    Ok(HttpResponse::Ok().json(ListResponse {
        games: records.into_iter().map(GameBody::from).collect(),
        total,
    }))
}

#[derive(Debug, Deserialize)]
struct RecordRequest {
    player1_name: Option<String>,
    player2_name: Option<String>,
    player1_move: Option<String>,
    player2_move: Option<String>,
    winner: Option<String>,
}

fn required_name(name: Option<String>, field: &str) -> Result<String, AppError> {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, format!("{field} is required")))
}

fn required_move(mv: Option<&str>, field: &str) -> Result<Move, AppError> {
    mv.ok_or_else(|| AppError::invalid(ErrorCode::MissingField, format!("{field} is required")))?
        .parse()
        .map_err(|e| AppError::invalid(ErrorCode::InvalidMove, format!("{field}: {e}")))
}

/// POST /api/games
///
/// Direct archive write for games resolved outside the match flow. The
/// winner is optional but must name a seat or a tie when present.
async fn record(
    app_state: web::Data<AppState>,
    body: web::Json<RecordRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let player1_name = required_name(req.player1_name, "player1_name")?;
    let player2_name = required_name(req.player2_name, "player2_name")?;
    let player1_move = required_move(req.player1_move.as_deref(), "player1_move")?;
    let player2_move = required_move(req.player2_move.as_deref(), "player2_move")?;
    let winner = req
        .winner
        .as_deref()
        .map(str::parse::<Winner>)
        .transpose()
        .map_err(|e| AppError::invalid(ErrorCode::InvalidWinner, format!("{e}")))?;

    let record = with_txn(&app_state, |txn| {
        Box::pin(async move {
            Ok(games::record_game(
                txn,
                &player1_name,
                &player2_name,
                player1_move,
                player2_move,
                winner,
            )
            .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameBody::from(record)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/games")
            .route(web::get().to(list))
            .route(web::post().to(record)),
    );
}
