mod support;

use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::domain::rules::{Move, Outcome};
use backend::error::AppError;
use backend::repos::{leaderboard, players};
use backend::services::solo::SoloService;
use backend::services::{leaderboard as leaderboard_svc, stats};

#[tokio::test]
async fn counters_accumulate_across_outcomes() -> Result<(), AppError> {
    let state = support::test_state().await;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let alice = players::ensure_by_name(txn, "Alice").await?;
            leaderboard::apply_outcome(txn, alice.id, "Alice", Outcome::Win).await?;
            leaderboard::apply_outcome(txn, alice.id, "Alice", Outcome::Win).await?;
            leaderboard::apply_outcome(txn, alice.id, "Alice", Outcome::Lose).await?;
            leaderboard::apply_outcome(txn, alice.id, "Alice", Outcome::Draw).await?;
            Ok::<_, AppError>(())
        })
    })
    .await?;

    let db = require_db(&state)?;
    let entry = leaderboard::find_by_name(db, "Alice").await?.unwrap();
    assert_eq!((entry.wins, entry.losses, entry.draws), (2, 1, 1));
    assert_eq!(entry.total_games(), 4);

    Ok(())
}

#[tokio::test]
async fn top_orders_by_wins_and_derives_percentages() -> Result<(), AppError> {
    let state = support::test_state().await;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let alice = players::ensure_by_name(txn, "Alice").await?;
            let bob = players::ensure_by_name(txn, "Bob").await?;
            for _ in 0..3 {
                leaderboard::apply_outcome(txn, alice.id, "Alice", Outcome::Win).await?;
            }
            leaderboard::apply_outcome(txn, alice.id, "Alice", Outcome::Lose).await?;
            leaderboard::apply_outcome(txn, bob.id, "Bob", Outcome::Win).await?;
            Ok::<_, AppError>(())
        })
    })
    .await?;

    let db = require_db(&state)?;
    let ranked = leaderboard_svc::top(db, 10).await?;
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].entry.player_name, "Alice");
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[0].total_games, 4);
    assert_eq!(ranked[0].win_percentage, 75.0);
    assert_eq!(ranked[1].entry.player_name, "Bob");
    assert_eq!(ranked[1].win_percentage, 100.0);

    Ok(())
}

#[tokio::test]
async fn overall_stats_cover_both_seats() -> Result<(), AppError> {
    let state = support::test_state().await;

    // Two solo rounds: rock vs scissors, paper vs paper
    with_txn(&state, |txn| {
        Box::pin(async move {
            SoloService::new()
                .play_against(txn, "Alice", Move::Rock, Move::Scissors)
                .await
        })
    })
    .await?;
    with_txn(&state, |txn| {
        Box::pin(async move {
            SoloService::new()
                .play_against(txn, "Bob", Move::Paper, Move::Paper)
                .await
        })
    })
    .await?;

    let db = require_db(&state)?;
    let overall = stats::overall(db).await?;
    assert_eq!(overall.total_games, 2);
    assert_eq!(overall.total_players, 2);

    // Four moves thrown: 1 rock, 2 paper, 1 scissors
    let by_move: Vec<(Move, i64)> = overall
        .move_distribution
        .iter()
        .map(|s| (s.mv, s.count))
        .collect();
    assert!(by_move.contains(&(Move::Rock, 1)));
    assert!(by_move.contains(&(Move::Paper, 2)));
    assert!(by_move.contains(&(Move::Scissors, 1)));

    let paper = overall
        .move_distribution
        .iter()
        .find(|s| s.mv == Move::Paper)
        .unwrap();
    assert_eq!(paper.percentage, 50.0);

    Ok(())
}

#[tokio::test]
async fn player_stats_for_unknown_player_are_empty() -> Result<(), AppError> {
    let state = support::test_state().await;

    let db = require_db(&state)?;
    let stats = stats::player_stats(db, "Nobody").await?;
    assert!(stats.entry.is_none());
    assert!(stats.recent_games.is_empty());

    Ok(())
}

#[tokio::test]
async fn player_stats_include_recent_games() -> Result<(), AppError> {
    let state = support::test_state().await;

    for _ in 0..7 {
        with_txn(&state, |txn| {
            Box::pin(async move {
                SoloService::new()
                    .play_against(txn, "Alice", Move::Rock, Move::Paper)
                    .await
            })
        })
        .await?;
    }

    let db = require_db(&state)?;
    let stats = stats::player_stats(db, "Alice").await?;
    let entry = stats.entry.unwrap();
    assert_eq!(entry.losses, 7);
    // Capped at the five most recent
    assert_eq!(stats.recent_games.len(), 5);

    Ok(())
}
