use std::sync::Arc;

use chrono::Utc;
use kanal::AsyncSender;
use lexi_core::error::CoreError;
use lexi_core::ladder::{CHALLENGE_SIZE, Challenge};
use lexi_core::types::AppEvent;

use crate::state::AppState;

pub async fn handle_start(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.ensure_today().await;

    if state.challenge.read().await.is_some() {
        app_to_ui_tx
            .send(AppEvent::StatusUpdate(
                "A challenge is already running".to_string(),
            ))
            .await?;
        return Ok(());
    }

    let started = {
        let cards = state.cards.read().await;
        let stats = state.stats.read().await;
        Challenge::start(
            &cards,
            CHALLENGE_SIZE,
            &stats.ladder,
            &mut rand::thread_rng(),
            Utc::now(),
        )
    };

    match started {
        Ok(challenge) => {
            let prompt = challenge
                .current()
                .map(|word| word.meaning.clone())
                .unwrap_or_default();
            let total = challenge.total();
            tracing::info!("Challenge {} started", challenge.id);
            *state.challenge.write().await = Some(challenge);
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(format!(
                    "Challenge started: {total} words.\nWord 1/{total}: {prompt}"
                )))
                .await?;
        }
        Err(e) => {
            // recoverable: no challenge state was created
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(e.to_string()))
                .await?;
        }
    }
    Ok(())
}

pub async fn handle_answer(
    state: Arc<AppState>,
    guess: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut slot = state.challenge.write().await;
    let Some(challenge) = slot.as_mut() else {
        app_to_ui_tx
            .send(AppEvent::StatusUpdate(
                CoreError::NoActiveChallenge.to_string(),
            ))
            .await?;
        return Ok(());
    };

    let expected = challenge
        .current()
        .map(|word| word.word.clone())
        .unwrap_or_default();
    let Some(outcome) = challenge.answer(guess) else {
        // blank guess, stay on the current word
        return Ok(());
    };

    let mut feedback = if outcome.accepted {
        format!("Correct: {expected}")
    } else {
        format!("Incorrect, the word was: {expected}")
    };

    if challenge.is_complete() {
        let result = challenge.resolve(Utc::now());
        let id = challenge.id;
        *slot = None;
        drop(slot);

        let ladder = {
            let mut stats = state.stats.write().await;
            stats.ladder = stats.ladder.clone().record(result.win);
            stats.ladder.clone()
        };
        crate::store::save(&state).await?;

        tracing::info!(
            "Challenge {} resolved: {} vs {} ({})",
            id,
            result.user_score,
            result.opponent_score,
            if result.win { "win" } else { "loss" }
        );
        feedback.push_str(&format!(
            "\nChallenge over: {}/{} correct.\nYour score {} vs opponent {} - {}.\nLadder: {} {}*  ({}W/{}L)",
            result.correct,
            result.total,
            result.user_score,
            result.opponent_score,
            if result.win { "you win" } else { "you lose" },
            ladder.tier.label(),
            ladder.stars,
            ladder.wins,
            ladder.losses
        ));
    } else {
        let position = challenge.position() + 1;
        let total = challenge.total();
        let prompt = challenge
            .current()
            .map(|word| word.meaning.clone())
            .unwrap_or_default();
        feedback.push_str(&format!("\nWord {position}/{total}: {prompt}"));
    }

    app_to_ui_tx.send(AppEvent::StatusUpdate(feedback)).await?;
    Ok(())
}
