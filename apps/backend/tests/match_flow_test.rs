mod support;

use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::domain::rules::{Move, Outcome};
use backend::entities::matches::MatchStatus;
use backend::error::AppError;
use backend::repos::{games, leaderboard, matches, participants, players};
use backend::services::match_flow::{MatchFlowService, PlayOutcome};

#[tokio::test]
async fn two_player_match_happy_path() -> Result<(), AppError> {
    let state = support::test_state().await;

    // Alice opens a galaxy match
    let (game, alice) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "galaxy", "Alice")
                .await
        })
    })
    .await?;
    assert_eq!(game.status, MatchStatus::Waiting);
    assert_eq!(game.theme, "galaxy");

    // Bob takes the open seat; the match starts
    let match_id = game.id;
    let (game, bob) = with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Bob").await })
    })
    .await?;
    assert_eq!(game.status, MatchStatus::InProgress);
    assert_ne!(alice.id, bob.id);

    // First move only records
    let alice_id = alice.id;
    let outcome = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, alice_id, Move::Rock)
                .await
        })
    })
    .await?;
    assert_eq!(outcome, PlayOutcome::Recorded);

    // Second move completes the match
    let bob_id = bob.id;
    let outcome = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, bob_id, Move::Scissors)
                .await
        })
    })
    .await?;
    let results = match outcome {
        PlayOutcome::Complete { results } => results,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].player_name, "Alice");
    assert_eq!(results[0].outcome, Outcome::Win);
    assert_eq!(results[1].player_name, "Bob");
    assert_eq!(results[1].outcome, Outcome::Lose);

    let db = require_db(&state)?;

    // Match is completed with a timestamp and persisted outcomes
    let game = matches::require_match(db, match_id).await?;
    assert_eq!(game.status, MatchStatus::Completed);
    assert!(game.completed_at.is_some());
    let stored = participants::list_by_match(db, match_id).await?;
    assert_eq!(stored[0].outcome, Some(Outcome::Win));
    assert_eq!(stored[1].outcome, Some(Outcome::Lose));

    // One archived game, counters moved for both players
    assert_eq!(games::count_games(db).await?, 1);
    let alice_entry = leaderboard::find_by_name(db, "Alice").await?.unwrap();
    assert_eq!((alice_entry.wins, alice_entry.losses), (1, 0));
    let bob_entry = leaderboard::find_by_name(db, "Bob").await?.unwrap();
    assert_eq!((bob_entry.wins, bob_entry.losses), (0, 1));

    Ok(())
}

#[tokio::test]
async fn join_started_match_reads_as_not_found() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (game, _) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "ocean", "Alice")
                .await
        })
    })
    .await?;
    let match_id = game.id;

    with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Bob").await })
    })
    .await?;

    // The seat is taken; a third player gets the same answer as for a
    // nonexistent match.
    let err = with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Carol").await })
    })
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    // Carol never became a participant
    let db = require_db(&state)?;
    assert_eq!(participants::list_by_match(db, match_id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn creator_rejoin_is_a_noop() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (game, alice) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "jungle", "Alice")
                .await
        })
    })
    .await?;
    let match_id = game.id;

    // Alice "joins" her own waiting match: nothing changes
    let (game, rejoined) = with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Alice").await })
    })
    .await?;
    assert_eq!(game.status, MatchStatus::Waiting);
    assert_eq!(rejoined.id, alice.id);

    let db = require_db(&state)?;
    assert_eq!(participants::list_by_match(db, match_id).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn resubmission_is_a_conflict() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (game, alice) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "galaxy", "Alice")
                .await
        })
    })
    .await?;
    let match_id = game.id;
    with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Bob").await })
    })
    .await?;

    let alice_id = alice.id;
    with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, alice_id, Move::Rock)
                .await
        })
    })
    .await?;

    // Second attempt, different move: rejected, first move stands
    let err = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, alice_id, Move::Paper)
                .await
        })
    })
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let db = require_db(&state)?;
    let me = participants::find(db, match_id, alice_id).await?.unwrap();
    assert_eq!(me.mv, Some(Move::Rock));

    Ok(())
}

#[tokio::test]
async fn retry_finalizes_when_both_moves_are_already_stored() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (game, alice) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "galaxy", "Alice")
                .await
        })
    })
    .await?;
    let match_id = game.id;
    let (_, bob) = with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Bob").await })
    })
    .await?;

    // Store both moves while the match stays in_progress: the state two
    // overlapping submissions leave behind when neither sees the other's
    // move before committing.
    let (alice_id, bob_id) = (alice.id, bob.id);
    with_txn(&state, |txn| {
        Box::pin(async move {
            participants::set_move(txn, match_id, alice_id, Move::Rock).await?;
            participants::set_move(txn, match_id, bob_id, Move::Scissors).await?;
            Ok::<_, AppError>(())
        })
    })
    .await?;

    let db = require_db(&state)?;
    assert_eq!(
        matches::require_match(db, match_id).await?.status,
        MatchStatus::InProgress
    );

    // A repeat submission is not a conflict here: it drives the stuck
    // match to completion.
    let outcome = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, alice_id, Move::Rock)
                .await
        })
    })
    .await?;
    let results = match outcome {
        PlayOutcome::Complete { results } => results,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(results[0].outcome, Outcome::Win);
    assert_eq!(results[1].outcome, Outcome::Lose);

    let game = matches::require_match(db, match_id).await?;
    assert_eq!(game.status, MatchStatus::Completed);
    assert_eq!(games::count_games(db).await?, 1);
    let alice_entry = leaderboard::find_by_name(db, "Alice").await?.unwrap();
    assert_eq!((alice_entry.wins, alice_entry.losses), (1, 0));

    Ok(())
}

#[tokio::test]
async fn submit_to_completed_match_returns_stored_result() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (game, alice) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "galaxy", "Alice")
                .await
        })
    })
    .await?;
    let match_id = game.id;
    let (_, bob) = with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Bob").await })
    })
    .await?;

    let (alice_id, bob_id) = (alice.id, bob.id);
    with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, alice_id, Move::Paper)
                .await
        })
    })
    .await?;
    with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, bob_id, Move::Paper)
                .await
        })
    })
    .await?;

    // Repeating a submission against the completed match replays the
    // stored result instead of failing or mutating anything.
    let outcome = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, alice_id, Move::Rock)
                .await
        })
    })
    .await?;
    let results = match outcome {
        PlayOutcome::Complete { results } => results,
        other => panic!("expected completion, got {other:?}"),
    };
    assert!(results.iter().all(|r| r.outcome == Outcome::Draw));
    assert!(results.iter().all(|r| r.mv == Move::Paper));

    // Exactly one archived game despite the replay
    let db = require_db(&state)?;
    assert_eq!(games::count_games(db).await?, 1);

    Ok(())
}

#[tokio::test]
async fn move_from_non_participant_is_not_found() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (game, _) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "galaxy", "Alice")
                .await
        })
    })
    .await?;
    let match_id = game.id;
    with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Bob").await })
    })
    .await?;

    // Unknown player id
    let err = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, 9999, Move::Rock)
                .await
        })
    })
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    // A real player who is not in this match
    let carol = with_txn(&state, |txn| {
        Box::pin(async move { Ok(players::ensure_by_name(txn, "Carol").await?) })
    })
    .await?;
    let carol_id = carol.id;
    let err = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .submit_move(txn, match_id, carol_id, Move::Rock)
                .await
        })
    })
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn waiting_match_is_discoverable_by_theme() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (first, _) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "ocean", "Alice")
                .await
        })
    })
    .await?;
    with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "ocean", "Carol")
                .await
        })
    })
    .await?;

    // Oldest waiting match wins
    let found = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .find_waiting_by_theme(txn, "ocean")
                .await
        })
    })
    .await?
    .expect("a waiting ocean match");
    assert_eq!(found.game.id, first.id);

    // Once started it stops being discoverable
    let match_id = first.id;
    with_txn(&state, |txn| {
        Box::pin(async move { MatchFlowService::new().join_match(txn, match_id, "Bob").await })
    })
    .await?;
    let found = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .find_waiting_by_theme(txn, "ocean")
                .await
        })
    })
    .await?
    .expect("the second ocean match");
    assert_ne!(found.game.id, match_id);

    Ok(())
}

#[tokio::test]
async fn same_name_resolves_to_same_player() -> Result<(), AppError> {
    let state = support::test_state().await;

    let (_, first) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "galaxy", "Alice")
                .await
        })
    })
    .await?;
    let (_, second) = with_txn(&state, |txn| {
        Box::pin(async move {
            MatchFlowService::new()
                .create_match(txn, "ocean", "Alice")
                .await
        })
    })
    .await?;
    assert_eq!(first.id, second.id);

    Ok(())
}
