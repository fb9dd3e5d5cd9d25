use std::sync::Arc;

use lexi_config::Settings;
use lexi_core::card::{Card, CardStore};
use lexi_core::ladder::Tier;
use lexi_core::stats::DailyStats;
use lexi_core::types::{AppEvent, Flow};

use crate::events::{challenge, grading, queues};
use crate::state::{AppState, today};

fn app_state(dir: &std::path::Path, cards: CardStore) -> Arc<AppState> {
    Arc::new(AppState::new(
        dir.to_path_buf(),
        Settings::new(),
        cards,
        Vec::new(),
        DailyStats::new(today()),
    ))
}

fn unseen_cards(count: usize) -> CardStore {
    let mut cards = CardStore::new();
    for i in 0..count {
        cards.insert_new(Card::new(format!("word{i:02}"), format!("meaning{i:02}")));
    }
    cards
}

#[tokio::test]
async fn first_grade_learns_then_reviews() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(dir.path(), unseen_cards(3));

    let outcome = grading::apply_grade(&state, "word00", 4).await.unwrap();
    assert!(outcome.was_new);
    assert_eq!(outcome.schedule.level.get(), 2);

    {
        let stats = state.stats.read().await;
        assert_eq!(stats.learned, 1);
        assert_eq!(stats.reviewed, 0);
        assert_eq!(stats.score, 2);
        assert_eq!(stats.rank, "Novice");
    }

    let outcome = grading::apply_grade(&state, "word00", 4).await.unwrap();
    assert!(!outcome.was_new);
    assert_eq!(outcome.schedule.level.get(), 3);

    let stats = state.stats.read().await;
    assert_eq!(stats.learned, 1);
    assert_eq!(stats.reviewed, 1);
    assert_eq!(stats.score, 3);
}

#[tokio::test]
async fn failed_grade_resets_and_lowers_score() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(dir.path(), unseen_cards(1));

    grading::apply_grade(&state, "word00", 5).await.unwrap();
    grading::apply_grade(&state, "word00", 5).await.unwrap();
    assert_eq!(state.stats.read().await.score, 3);

    let outcome = grading::apply_grade(&state, "word00", 1).await.unwrap();
    assert_eq!(outcome.schedule.level.get(), 1);
    assert_eq!(state.stats.read().await.score, 1);
}

#[tokio::test]
async fn next_card_pops_from_a_fresh_queue() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(dir.path(), unseen_cards(4));
    let (tx, rx) = kanal::bounded_async::<AppEvent>(16);

    queues::handle_next_card(state.clone(), Flow::Study, &tx)
        .await
        .unwrap();

    match rx.recv().await.unwrap() {
        AppEvent::ShowCard(Flow::Study, view) => {
            assert!(view.is_new);
            assert_eq!(view.word, "word00");
        }
        other => panic!("Expected ShowCard, got {other:?}"),
    }
}

#[tokio::test]
async fn review_queue_is_empty_with_nothing_due() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(dir.path(), unseen_cards(4));
    let (tx, rx) = kanal::bounded_async::<AppEvent>(16);

    queues::handle_next_card(state.clone(), Flow::Review, &tx)
        .await
        .unwrap();

    assert!(matches!(
        rx.recv().await.unwrap(),
        AppEvent::QueueEmpty(Flow::Review)
    ));
}

#[tokio::test]
async fn one_more_set_mints_new_cards_without_touching_stats() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(dir.path(), unseen_cards(12));
    state.stats.write().await.learned = 10;
    let (tx, rx) = kanal::bounded_async::<AppEvent>(16);

    // quota exhausted: a plain refresh offers nothing new
    queues::handle_refresh(state.clone(), &tx).await.unwrap();
    rx.recv().await.unwrap();
    assert!(state.queues.read().await.study.is_empty());

    queues::handle_one_more_set(state.clone(), &tx).await.unwrap();
    rx.recv().await.unwrap();
    assert_eq!(state.queues.read().await.study.len(), 5);
    assert_eq!(state.stats.read().await.learned, 10);
}

#[tokio::test]
async fn challenge_needs_enough_studied_cards() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(dir.path(), unseen_cards(20));
    let (tx, rx) = kanal::bounded_async::<AppEvent>(64);

    challenge::handle_start(state.clone(), &tx).await.unwrap();
    match rx.recv().await.unwrap() {
        AppEvent::StatusUpdate(text) => assert!(text.contains("Need at least")),
        other => panic!("Expected StatusUpdate, got {other:?}"),
    }
    assert!(state.challenge.read().await.is_none());
    assert_eq!(state.stats.read().await.ladder.wins, 0);
}

#[tokio::test]
async fn perfect_challenge_run_wins_a_star() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(dir.path(), unseen_cards(12));

    for i in 0..12 {
        grading::apply_grade(&state, &format!("word{i:02}"), 4)
            .await
            .unwrap();
    }

    let (tx, rx) = kanal::bounded_async::<AppEvent>(64);
    challenge::handle_start(state.clone(), &tx).await.unwrap();
    rx.recv().await.unwrap();
    assert!(state.challenge.read().await.is_some());

    loop {
        let word = {
            let slot = state.challenge.read().await;
            match slot.as_ref().and_then(|c| c.current()) {
                Some(current) => current.word.clone(),
                None => break,
            }
        };
        challenge::handle_answer(state.clone(), &word, &tx)
            .await
            .unwrap();
        rx.recv().await.unwrap();
    }

    assert!(state.challenge.read().await.is_none());
    let stats = state.stats.read().await;
    assert_eq!(stats.ladder.tier, Tier::Bronze);
    assert_eq!(stats.ladder.stars, 2);
    assert_eq!(stats.ladder.wins, 1);
}
