use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lexi_assistant::ChatClient;
use lexi_core::types::AppEvent;
use lexi_decks::DeckClient;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod state;
mod store;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "lexi", about = "Vocabulary flashcards in the terminal")]
struct Args {
    /// Directory holding the persisted snapshot
    #[arg(long, env = "LEXI_DATA_DIR", default_value = "lexi-data")]
    data_dir: PathBuf,

    /// Skip fetching built-in decks at startup
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(atty::is(atty::Stream::Stdout))
        .init();

    let args = Args::parse();

    let snapshot = store::load_snapshot(&args.data_dir)?;
    let state = Arc::new(store::into_state(args.data_dir.clone(), snapshot));

    if !args.offline {
        let client = DeckClient::new();
        if let Err(e) = events::decks::bootstrap_decks(&state, &client).await {
            tracing::warn!("Deck bootstrap failed: {e:#}");
        }
    }

    let assistant = build_assistant(&state).await;

    let controller = AppController::new(state.clone());
    let mut tasks = controller.spawn_tasks(assistant);

    // prime the queues so the first 'study' has something to pop
    controller.sender().send(AppEvent::RefreshQueues).await?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("Task finished, shutting down"),
                Some(Ok(Err(e))) => tracing::error!("Task failed: {e:#}"),
                Some(Err(e)) => tracing::error!("Task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    store::save(&state).await?;
    Ok(())
}

async fn build_assistant(state: &Arc<AppState>) -> Option<Arc<ChatClient>> {
    let settings = state.settings.read().await;
    let config = &settings.assistant;
    if !config.enabled || config.base.is_empty() {
        tracing::warn!("Assistant disabled or unconfigured");
        return None;
    }
    Some(Arc::new(ChatClient::new(
        config.base.clone(),
        config.api_key.clone(),
        config.model.clone(),
        config.temperature,
        config.max_tokens,
    )))
}
