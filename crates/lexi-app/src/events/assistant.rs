use std::sync::Arc;

use kanal::AsyncSender;
use lexi_assistant::{Assistant, ChatClient, ChatMessage, trim_history};
use lexi_core::types::AppEvent;

use crate::state::AppState;

/// Relay a prompt to the remote tutor. Fire-and-forget: the call runs on
/// its own task and never blocks or mutates scheduler state; a failure
/// comes back as a displayed message.
pub async fn handle_chat(
    state: Arc<AppState>,
    client: Option<Arc<ChatClient>>,
    prompt: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(client) = client else {
        app_to_ui_tx
            .send(AppEvent::AssistantReply(
                "Assistant is not configured (set LEXI_ASSISTANT_BASE and LEXI_ASSISTANT_KEY)"
                    .to_string(),
            ))
            .await?;
        return Ok(());
    };

    let (system, max_turns) = {
        let settings = state.settings.read().await;
        (
            settings.assistant.system.clone(),
            settings.assistant.max_turns,
        )
    };

    let messages = {
        let mut history = state.chat_history.write().await;
        history.push(ChatMessage::user(prompt));
        trim_history(&mut history, max_turns);

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(system));
        messages.extend(history.iter().cloned());
        messages
    };

    let tx = app_to_ui_tx.clone();
    tokio::spawn(async move {
        match client.chat(&messages).await {
            Ok(reply) => {
                let mut history = state.chat_history.write().await;
                history.push(ChatMessage::assistant(reply.clone()));
                trim_history(&mut history, max_turns);
                drop(history);
                let _ = tx.send(AppEvent::AssistantReply(reply)).await;
            }
            Err(e) => {
                tracing::warn!("Assistant call failed: {e}");
                let _ = tx
                    .send(AppEvent::AssistantReply(format!(
                        "Assistant call failed: {e}"
                    )))
                    .await;
            }
        }
    });

    Ok(())
}
