mod support;

use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::domain::rules::{Move, Outcome};
use backend::error::AppError;
use backend::repos::games::Winner;
use backend::repos::{games, leaderboard};
use backend::services::solo::{SoloService, COMPUTER_NAME};

#[tokio::test]
async fn solo_win_archives_and_counts() -> Result<(), AppError> {
    let state = support::test_state().await;

    let round = with_txn(&state, |txn| {
        Box::pin(async move {
            SoloService::new()
                .play_against(txn, "Alice", Move::Rock, Move::Scissors)
                .await
        })
    })
    .await?;
    assert_eq!(round.outcome, Outcome::Win);
    assert_eq!(round.game.player1_name, "Alice");
    assert_eq!(round.game.player2_name, COMPUTER_NAME);
    assert_eq!(round.game.winner, Some(Winner::Player1));

    let db = require_db(&state)?;
    let entry = leaderboard::find_by_name(db, "Alice").await?.unwrap();
    assert_eq!((entry.wins, entry.losses, entry.draws), (1, 0, 0));

    // Only the human is on the leaderboard
    assert!(leaderboard::find_by_name(db, COMPUTER_NAME).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn solo_draw_moves_only_the_draw_counter() -> Result<(), AppError> {
    let state = support::test_state().await;

    let round = with_txn(&state, |txn| {
        Box::pin(async move {
            SoloService::new()
                .play_against(txn, "Bob", Move::Paper, Move::Paper)
                .await
        })
    })
    .await?;
    assert_eq!(round.outcome, Outcome::Draw);
    assert_eq!(round.game.winner, Some(Winner::Tie));

    let db = require_db(&state)?;
    let entry = leaderboard::find_by_name(db, "Bob").await?.unwrap();
    assert_eq!((entry.wins, entry.losses, entry.draws), (0, 0, 1));

    Ok(())
}

#[tokio::test]
async fn random_opponent_move_is_always_legal() -> Result<(), AppError> {
    let state = support::test_state().await;

    for _ in 0..10 {
        let round = with_txn(&state, |txn| {
            Box::pin(async move { SoloService::new().play(txn, "Carol", Move::Rock).await })
        })
        .await?;
        assert!(Move::ALL.contains(&round.computer_move));
    }

    let db = require_db(&state)?;
    assert_eq!(games::count_games(db).await?, 10);
    let entry = leaderboard::find_by_name(db, "Carol").await?.unwrap();
    assert_eq!(entry.wins + entry.losses + entry.draws, 10);

    Ok(())
}
