//! Match lifecycle HTTP routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::match_flow::{MatchDetail, MatchFlowService};
use crate::state::app_state::AppState;

const RECENT_MATCHES_DEFAULT: u64 = 10;
const RECENT_MATCHES_MAX: u64 = 50;

#[derive(Debug, Deserialize)]
struct MatchActionRequest {
    action: Option<String>,
    player_name: Option<String>,
    theme: Option<String>,
    match_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct MatchBody {
    id: i64,
    theme: String,
    status: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    completed_at: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
struct ParticipantBody {
    player_id: i64,
    player_name: String,
    has_moved: bool,
    /// Only revealed once the match is completed, so a participant cannot
    /// read the opponent's pending move.
    #[serde(skip_serializing_if = "Option::is_none")]
    r#move: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<String>,
}

#[derive(Debug, Serialize)]
struct MatchDetailBody {
    #[serde(rename = "match")]
    game: MatchBody,
    participants: Vec<ParticipantBody>,
}

#[derive(Debug, Serialize)]
struct MatchActionResponse {
    #[serde(rename = "match")]
    game: MatchBody,
    player_id: i64,
    player_name: String,
}

#[derive(Debug, Serialize)]
struct RecentMatchesResponse {
    matches: Vec<MatchDetailBody>,
}

fn match_body(game: &crate::repos::matches::Match) -> MatchBody {
    MatchBody {
        id: game.id,
        theme: game.theme.clone(),
        status: game.status.as_str().to_string(),
        created_at: game.created_at,
        completed_at: game.completed_at,
    }
}

fn detail_body(detail: MatchDetail) -> MatchDetailBody {
    let completed = detail.game.is_completed();
    let participants = detail
        .participants
        .into_iter()
        .map(|p| ParticipantBody {
            player_id: p.participant.player_id,
            player_name: p.player_name,
            has_moved: p.participant.mv.is_some(),
            r#move: if completed {
                p.participant.mv.map(|m| m.as_str().to_string())
            } else {
                None
            },
            outcome: p.participant.outcome.map(|o| o.as_str().to_string()),
        })
        .collect();
    MatchDetailBody {
        game: match_body(&detail.game),
        participants,
    }
}

fn required_name(name: Option<String>) -> Result<String, AppError> {
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "player_name is required"))?;
    Ok(name)
}

/// POST /api/match
///
/// `action: "create"` opens a waiting match; `action: "join"` takes the
/// open seat of a waiting match and starts it.
async fn match_action(
    app_state: web::Data<AppState>,
    body: web::Json<MatchActionRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let action = req
        .action
        .as_deref()
        .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "action is required"))?;

    match action {
        "create" => {
            let player_name = required_name(req.player_name)?;
            let theme = req
                .theme
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| AppError::invalid(ErrorCode::MissingField, "theme is required"))?;

            let (game, player) = with_txn(&app_state, |txn| {
                Box::pin(async move {
                    MatchFlowService::new()
                        .create_match(txn, &theme, &player_name)
                        .await
                })
            })
            .await?;

            Ok(HttpResponse::Created().json(MatchActionResponse {
                game: match_body(&game),
                player_id: player.id,
                player_name: player.name,
            }))
        }
        "join" => {
            let player_name = required_name(req.player_name)?;
            let match_id = req.match_id.ok_or_else(|| {
                AppError::invalid(ErrorCode::MissingField, "match_id is required")
            })?;

            let (game, player) = with_txn(&app_state, |txn| {
                Box::pin(async move {
                    MatchFlowService::new()
                        .join_match(txn, match_id, &player_name)
                        .await
                })
            })
            .await?;

            Ok(HttpResponse::Ok().json(MatchActionResponse {
                game: match_body(&game),
                player_id: player.id,
                player_name: player.name,
            }))
        }
        other => Err(AppError::invalid(
            ErrorCode::InvalidAction,
            format!("Unknown action {other:?} (expected create or join)"),
        )),
    }
}

#[derive(Debug, Deserialize)]
struct MatchQuery {
    match_id: Option<i64>,
    theme: Option<String>,
}

/// GET /api/match?match_id=N or ?theme=T
///
/// By id: the match in any status. By theme: the oldest waiting match
/// for that theme, 404 when nobody is waiting.
async fn get_match(
    app_state: web::Data<AppState>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();

    if let Some(match_id) = query.match_id {
        let detail = with_txn(&app_state, |txn| {
            Box::pin(async move { MatchFlowService::new().match_detail(txn, match_id).await })
        })
        .await?;
        return Ok(HttpResponse::Ok().json(detail_body(detail)));
    }

    if let Some(theme) = query.theme {
        let detail = with_txn(&app_state, |txn| {
            Box::pin(async move {
                MatchFlowService::new().find_waiting_by_theme(txn, &theme).await
            })
        })
        .await?
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::MatchNotFound, "No waiting match for this theme")
        })?;
        return Ok(HttpResponse::Ok().json(detail_body(detail)));
    }

    Err(AppError::invalid(
        ErrorCode::MissingField,
        "match_id or theme is required",
    ))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<u64>,
}

/// GET /api/matches/recent
async fn recent_matches(
    app_state: web::Data<AppState>,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query
        .limit
        .unwrap_or(RECENT_MATCHES_DEFAULT)
        .min(RECENT_MATCHES_MAX);

    let details = with_txn(&app_state, |txn| {
        Box::pin(async move { MatchFlowService::new().recent_matches(txn, limit).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(RecentMatchesResponse {
        matches: details.into_iter().map(detail_body).collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/match")
            .route(web::post().to(match_action))
            .route(web::get().to(get_match)),
    );
    cfg.service(web::resource("/api/matches/recent").route(web::get().to(recent_matches)));
}
