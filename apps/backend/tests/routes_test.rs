mod support;

use actix_web::{test, web, App};
use backend::middleware::RequestTrace;
use backend::routes;
use serde_json::json;

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn full_match_over_http() {
    let state = support::test_state().await;
    let app = test_app!(state);

    // Create
    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "create", "player_name": "Alice", "theme": "galaxy"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["match"]["status"], "waiting");
    let match_id = created["match"]["id"].as_i64().unwrap();
    let alice_id = created["player_id"].as_i64().unwrap();

    // Join
    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "join", "player_name": "Bob", "match_id": match_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let joined: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(joined["match"]["status"], "in_progress");
    let bob_id = joined["player_id"].as_i64().unwrap();

    // First move waits for the opponent
    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({"match_id": match_id, "player_id": alice_id, "move": "rock"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let played: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(played["status"], "waiting_for_opponent");

    // Second move completes the match
    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({"match_id": match_id, "player_id": bob_id, "move": "scissors"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let played: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(played["status"], "completed");
    let results = played["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["player_name"], "Alice");
    assert_eq!(results[0]["outcome"], "win");
    assert_eq!(results[1]["outcome"], "lose");

    // The detail view now reveals both moves
    let req = test::TestRequest::get()
        .uri(&format!("/api/match?match_id={match_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let detail: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(detail["match"]["status"], "completed");
    assert_eq!(detail["participants"][0]["move"], "rock");
    assert_eq!(detail["participants"][1]["move"], "scissors");

    // Leaderboard reflects the result
    let req = test::TestRequest::get().uri("/api/leaderboard").to_request();
    let resp = test::call_service(&app, req).await;
    let board: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(board["leaderboard"][0]["player_name"], "Alice");
    assert_eq!(board["leaderboard"][0]["wins"], 1);
}

#[actix_web::test]
async fn pending_move_is_hidden_from_the_detail_view() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "create", "player_name": "Alice", "theme": "ocean"}))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let match_id = created["match"]["id"].as_i64().unwrap();
    let alice_id = created["player_id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "join", "player_name": "Bob", "match_id": match_id}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({"match_id": match_id, "player_id": alice_id, "move": "paper"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/match?match_id={match_id}"))
        .to_request();
    let detail: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["participants"][0]["has_moved"], true);
    assert!(detail["participants"][0].get("move").is_none());
}

#[actix_web::test]
async fn invalid_move_is_a_problem_json_400() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({"match_id": 1, "player_id": 1, "move": "lizard"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let headers = resp.headers().clone();
    let content_type = headers.get("content-type").unwrap().to_str().unwrap();
    assert_eq!(content_type, "application/problem+json");
    let trace_header = headers.get("x-trace-id").unwrap().to_str().unwrap();
    assert!(!trace_header.is_empty());

    let problem: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"], "INVALID_MOVE");
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["trace_id"], trace_header);
}

#[actix_web::test]
async fn unknown_action_is_rejected() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "spectate", "player_name": "Alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let problem: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"], "INVALID_ACTION");
}

#[actix_web::test]
async fn joining_a_missing_match_is_404() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "join", "player_name": "Bob", "match_id": 4242}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let problem: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"], "MATCH_NOT_FOUND");
}

#[actix_web::test]
async fn resubmission_over_http_is_409() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "create", "player_name": "Alice", "theme": "galaxy"}))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let match_id = created["match"]["id"].as_i64().unwrap();
    let alice_id = created["player_id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({"action": "join", "player_name": "Bob", "match_id": match_id}))
        .to_request();
    test::call_service(&app, req).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/play")
            .set_json(json!({"match_id": match_id, "player_id": alice_id, "move": "rock"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        if resp.status().as_u16() == 200 {
            continue;
        }
        assert_eq!(resp.status().as_u16(), 409);
        let problem: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(problem["code"], "MOVE_ALREADY_SUBMITTED");
    }
}

#[actix_web::test]
async fn solo_round_over_http() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/solo")
        .set_json(json!({"player_name": "Alice", "move": "rock"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let round: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(round["player_move"], "rock");
    assert!(["rock", "paper", "scissors"]
        .contains(&round["computer_move"].as_str().unwrap()));
    assert!(["win", "lose", "draw"].contains(&round["outcome"].as_str().unwrap()));

    // The round landed in the archive
    let req = test::TestRequest::get().uri("/api/games").to_request();
    let games: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(games["total"], 1);
    assert_eq!(games["games"][0]["player2_name"], "Computer");
}

#[actix_web::test]
async fn archive_post_validates_winner() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({
            "player1_name": "Alice",
            "player2_name": "Bob",
            "player1_move": "rock",
            "player2_move": "paper",
            "winner": "player3"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let problem: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"], "INVALID_WINNER");

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({
            "player1_name": "Alice",
            "player2_name": "Bob",
            "player1_move": "rock",
            "player2_move": "paper",
            "winner": "player2"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let recorded: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(recorded["winner"], "player2");
}

#[actix_web::test]
async fn health_reports_ok() {
    let state = support::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let health: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["db"], "ok");
}
