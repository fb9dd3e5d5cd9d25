use std::path::Path;
use std::sync::Arc;

use kanal::AsyncSender;
use lexi_core::stats::DailyStats;
use lexi_core::types::AppEvent;

use crate::state::{AppState, today};
use crate::store;

pub async fn handle_export(
    state: Arc<AppState>,
    path: &Path,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let message = match store::export(&state, path).await {
        Ok(()) => format!("Exported to {}", path.display()),
        Err(e) => {
            tracing::warn!("Export failed: {e:#}");
            format!("Export failed: {e}")
        }
    };
    app_to_ui_tx.send(AppEvent::StatusUpdate(message)).await?;
    Ok(())
}

/// Overlay a previously exported snapshot onto the running state. A parse
/// failure is reported and changes nothing.
pub async fn handle_import_state(
    state: Arc<AppState>,
    path: &Path,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) => {
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(format!(
                    "Cannot read {}: {e}",
                    path.display()
                )))
                .await?;
            return Ok(());
        }
    };

    let snapshot = match store::parse_snapshot(&data) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("State import failed: {e:#}");
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(format!("Import failed: {e}")))
                .await?;
            return Ok(());
        }
    };

    {
        let mut settings = state.settings.write().await;
        *settings = snapshot.settings;
    }
    {
        let mut decks = state.decks.write().await;
        *decks = snapshot.decks;
    }
    {
        let mut cards = state.cards.write().await;
        *cards = snapshot.cards;
    }
    {
        let mut stats = state.stats.write().await;
        *stats = snapshot
            .stats
            .unwrap_or_else(|| DailyStats::new(today()))
            .rolled_over(today());
    }

    store::save(&state).await?;
    app_to_ui_tx
        .send(AppEvent::StatusUpdate("State imported".to_string()))
        .await?;
    crate::events::queues::handle_refresh(state, app_to_ui_tx).await?;
    Ok(())
}

/// Full data wipe: drop every piece of state back to defaults and delete
/// the persisted snapshot
pub async fn handle_wipe(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    {
        let mut settings = state.settings.write().await;
        *settings = lexi_config::Settings::new();
    }
    state.decks.write().await.clear();
    {
        let mut cards = state.cards.write().await;
        *cards = lexi_core::card::CardStore::new();
    }
    {
        let mut stats = state.stats.write().await;
        *stats = DailyStats::new(today());
    }
    *state.queues.write().await = Default::default();
    *state.challenge.write().await = None;
    state.chat_history.write().await.clear();

    store::wipe(&state.data_dir)?;
    tracing::info!("All data wiped");
    app_to_ui_tx
        .send(AppEvent::StatusUpdate("All data wiped".to_string()))
        .await?;
    Ok(())
}

pub async fn handle_show_status(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.ensure_today().await;

    let mut lines = {
        let stats = state.stats.read().await;
        vec![
            format!("Date: {}  (streak {})", stats.date, stats.streak),
            format!("Learned {} / reviewed {} today", stats.learned, stats.reviewed),
            format!("Score {}  rank {}", stats.score, stats.rank),
            format!(
                "Ladder: {} {}*  ({}W/{}L)",
                stats.ladder.tier.label(),
                stats.ladder.stars,
                stats.ladder.wins,
                stats.ladder.losses
            ),
        ]
    };

    {
        let decks = state.decks.read().await;
        let cards = state.cards.read().await;
        for deck in decks.iter() {
            lines.push(format!(
                "Deck {} [{}]: {}% of {} words",
                deck.id,
                if deck.enabled { "on" } else { "off" },
                cards.deck_progress(&deck.id, deck.size),
                deck.size
            ));
        }
    }

    app_to_ui_tx
        .send(AppEvent::StatusUpdate(lines.join("\n")))
        .await?;
    Ok(())
}
