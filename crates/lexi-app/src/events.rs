use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_assistant::ChatClient;
use lexi_core::types::AppEvent;

use crate::state::AppState;

pub mod assistant;
pub mod challenge;
pub mod decks;
pub mod grading;
pub mod queues;
pub mod snapshot;
pub mod spell;

/// App's main loop: one event at a time, each handler runs to completion
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    assistant_client: Option<Arc<ChatClient>>,
) -> anyhow::Result<()> {
    tracing::info!("Event loop started");
    loop {
        let event = ui_to_app_rx.recv().await?;
        handle_events(
            state.clone(),
            assistant_client.clone(),
            &app_to_ui_tx,
            event,
        )
        .await?;
    }
}

async fn handle_events(
    state: Arc<AppState>,
    assistant_client: Option<Arc<ChatClient>>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::SettingsChanged => {
            crate::store::save(&state).await?;
            queues::handle_refresh(state, app_to_ui_tx).await?;
        }
        AppEvent::RefreshQueues => {
            queues::handle_refresh(state, app_to_ui_tx).await?;
        }
        AppEvent::NextCard(flow) => {
            queues::handle_next_card(state, flow, app_to_ui_tx).await?;
        }
        AppEvent::Grade { word, grade } => {
            grading::handle_grade(state, &word, grade, app_to_ui_tx).await?;
        }
        AppEvent::SpellCheck { flow, word, guess } => {
            spell::handle_spell_check(state, flow, &word, &guess, app_to_ui_tx).await?;
        }
        AppEvent::OneMoreSet => {
            queues::handle_one_more_set(state, app_to_ui_tx).await?;
        }
        AppEvent::ToggleDeck { id, enabled } => {
            decks::handle_toggle_deck(state, &id, enabled, app_to_ui_tx).await?;
        }
        AppEvent::ImportWordlist { path } => {
            decks::handle_import_wordlist(state, &path, app_to_ui_tx).await?;
        }
        AppEvent::ExportState { path } => {
            snapshot::handle_export(state, &path, app_to_ui_tx).await?;
        }
        AppEvent::ImportState { path } => {
            snapshot::handle_import_state(state, &path, app_to_ui_tx).await?;
        }
        AppEvent::StartChallenge => {
            challenge::handle_start(state, app_to_ui_tx).await?;
        }
        AppEvent::ChallengeAnswer { guess } => {
            challenge::handle_answer(state, &guess, app_to_ui_tx).await?;
        }
        AppEvent::AssistantChat { prompt } => {
            assistant::handle_chat(state, assistant_client, prompt, app_to_ui_tx).await?;
        }
        AppEvent::ShowStatus => {
            snapshot::handle_show_status(state, app_to_ui_tx).await?;
        }
        AppEvent::WipeData => {
            snapshot::handle_wipe(state, app_to_ui_tx).await?;
        }
        AppEvent::ShowCard(..)
        | AppEvent::QueueEmpty(_)
        | AppEvent::StatusUpdate(_)
        | AppEvent::AssistantReply(_) => {
            // display-direction events, handled by the driver loop
        }
    }

    Ok(())
}
