use std::env;
use std::path::Path;
use std::sync::Arc;

use kanal::AsyncSender;
use lexi_core::card::Card;
use lexi_core::types::AppEvent;
use lexi_decks::{Deck, DeckClient, DeckSource, WordEntry};

use crate::state::AppState;

/// Built-in decks fetched at startup. The demo deck starts enabled, the
/// rest opt in through a toggle.
pub fn builtin_sources() -> Vec<DeckSource> {
    let base = env::var("LEXI_DECK_BASE")
        .unwrap_or_else(|_| "https://wordlists.lexi.dev".to_string());
    let base = base.trim_end_matches('/');

    [("demo", "Demo"), ("cet4", "CET4")]
        .into_iter()
        .map(|(id, title)| DeckSource {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("{base}/{id}.json"),
        })
        .collect()
}

/// Fetch the built-in decks and merge them into the store. Cards that
/// already exist keep their progress; decks that fail to load are skipped.
pub async fn bootstrap_decks(state: &Arc<AppState>, client: &DeckClient) -> anyhow::Result<()> {
    let loaded = client.fetch_all(&builtin_sources()).await;

    for (source, document) in loaded {
        let added = insert_entries(state, &document.entries, &source.id).await;
        tracing::info!(
            "Deck '{}': {} entries, {} new cards",
            source.id,
            document.entries.len(),
            added
        );

        let mut decks = state.decks.write().await;
        match decks.iter_mut().find(|deck| deck.id == source.id) {
            Some(existing) => {
                existing.title = document.title.clone();
                existing.size = document.entries.len();
            }
            None => {
                decks.push(Deck {
                    id: source.id.clone(),
                    title: document.title.clone(),
                    size: document.entries.len(),
                    enabled: source.id == "demo",
                });
            }
        }
    }

    crate::store::save(state).await?;
    Ok(())
}

async fn insert_entries(state: &Arc<AppState>, entries: &[WordEntry], deck_id: &str) -> usize {
    let mut cards = state.cards.write().await;
    let mut added = 0;
    for entry in entries {
        let mut card = Card::new(entry.word.clone(), entry.meaning.clone());
        card.example = entry.example.clone();
        card.deck = Some(deck_id.to_string());
        if cards.insert_new(card) {
            added += 1;
        }
    }
    added
}

pub async fn handle_toggle_deck(
    state: Arc<AppState>,
    id: &str,
    enabled: bool,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let found = {
        let mut decks = state.decks.write().await;
        match decks.iter_mut().find(|deck| deck.id == id) {
            Some(deck) => {
                deck.enabled = enabled;
                true
            }
            None => false,
        }
    };

    if !found {
        app_to_ui_tx
            .send(AppEvent::StatusUpdate(format!("Unknown deck: {id}")))
            .await?;
        return Ok(());
    }

    crate::store::save(&state).await?;
    crate::events::queues::handle_refresh(state, app_to_ui_tx).await?;
    Ok(())
}

/// Import a JSON or CSV wordlist as a new enabled deck. A parse failure is
/// reported and leaves every piece of state untouched.
pub async fn handle_import_wordlist(
    state: Arc<AppState>,
    path: &Path,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let entries = match tokio::fs::read_to_string(path).await {
        Ok(text) => match lexi_decks::parse_wordlist(&file_name, &text) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Wordlist import failed: {e:#}");
                app_to_ui_tx
                    .send(AppEvent::StatusUpdate(format!("Import failed: {e}")))
                    .await?;
                return Ok(());
            }
        },
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

    let id = Path::new(&file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "import".to_string());

    insert_entries(&state, &entries, &id).await;
    {
        let mut decks = state.decks.write().await;
        decks.push(Deck {
            id,
            title: file_name,
            size: entries.len(),
            enabled: true,
        });
    }

    crate::store::save(&state).await?;
    app_to_ui_tx
        .send(AppEvent::StatusUpdate(format!(
            "Imported {} entries",
            entries.len()
        )))
        .await?;
    crate::events::queues::handle_refresh(state, app_to_ui_tx).await?;
    Ok(())
}
