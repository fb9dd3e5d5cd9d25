use std::collections::BTreeSet;
use std::sync::Arc;

use kanal::AsyncSender;
use lexi_core::queue;
use lexi_core::types::{AppEvent, CardView, Flow};

use crate::state::{AppState, today};

/// Rebuild both queues from the visible pool. `learned_override` lets the
/// "one more set" flow mint another batch without touching persisted stats.
async fn rebuild(state: &Arc<AppState>, learned_override: Option<u32>) {
    state.ensure_today().await;

    let enabled: BTreeSet<String> = {
        let decks = state.decks.read().await;
        decks
            .iter()
            .filter(|deck| deck.enabled)
            .map(|deck| deck.id.clone())
            .collect()
    };

    let built = {
        let cards = state.cards.read().await;
        let settings = state.settings.read().await;
        let stats = state.stats.read().await;
        let learned = learned_override.unwrap_or(stats.learned);
        queue::build(&cards, &enabled, &settings.daily, learned, today())
    };

    tracing::debug!(
        "Queues rebuilt: {} study, {} review",
        built.study.len(),
        built.review.len()
    );
    *state.queues.write().await = built;
}

pub async fn handle_refresh(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    rebuild(&state, None).await;
    let queues = state.queues.read().await;
    app_to_ui_tx
        .send(AppEvent::StatusUpdate(format!(
            "Queues ready: {} to study, {} to review",
            queues.study.len(),
            queues.review.len()
        )))
        .await?;
    Ok(())
}

/// Pop the next card off the study or review queue. An exhausted queue is
/// rebuilt once; if it stays empty the learner is done for now.
pub async fn handle_next_card(
    state: Arc<AppState>,
    flow: Flow,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut key = pop(&state, flow).await;
    if key.is_none() {
        rebuild(&state, None).await;
        key = pop(&state, flow).await;
    }

    let Some(key) = key else {
        app_to_ui_tx.send(AppEvent::QueueEmpty(flow)).await?;
        return Ok(());
    };

    let view = {
        let cards = state.cards.read().await;
        cards.get(&key).map(|card| CardView {
            word: card.word.clone(),
            meaning: card.meaning.clone(),
            example: card.example.clone(),
            is_new: card.schedule.is_none(),
        })
    };

    match view {
        Some(view) => {
            app_to_ui_tx.send(AppEvent::ShowCard(flow, view)).await?;
        }
        None => {
            tracing::warn!("Queued card '{key}' vanished from the store");
            app_to_ui_tx.send(AppEvent::QueueEmpty(flow)).await?;
        }
    }
    Ok(())
}

async fn pop(state: &Arc<AppState>, flow: Flow) -> Option<String> {
    let mut queues = state.queues.write().await;
    match flow {
        Flow::Study => queues.study.pop_front(),
        Flow::Review => queues.review.pop_front(),
    }
}

/// Rebuild with the learned counter virtually reduced by one day's quota,
/// releasing another batch of new cards. Persisted stats stay untouched.
pub async fn handle_one_more_set(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let adjusted = {
        let settings = state.settings.read().await;
        let stats = state.stats.read().await;
        stats.learned.saturating_sub(settings.daily.new_per_day)
    };
    rebuild(&state, Some(adjusted)).await;

    let queues = state.queues.read().await;
    app_to_ui_tx
        .send(AppEvent::StatusUpdate(format!(
            "One more set: {} to study, {} to review",
            queues.study.len(),
            queues.review.len()
        )))
        .await?;
    Ok(())
}
