use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lexi_config::Settings;
use lexi_core::card::CardStore;
use lexi_core::stats::DailyStats;
use lexi_decks::Deck;
use serde::{Deserialize, Serialize};

use crate::state::{AppState, today};

const SNAPSHOT_FILE: &str = "snapshot.json";

/// The full persisted state: one JSON document, written whole after every
/// mutation. Missing sections fall back to defaults on load, so older and
/// partial snapshots import cleanly.
#[derive(Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub decks: Vec<Deck>,
    #[serde(default)]
    pub cards: CardStore,
    #[serde(default)]
    pub stats: Option<DailyStats>,
}

impl Snapshot {
    /// Capture the current state, redacting the assistant key unless the
    /// user opted into persisting it
    pub async fn capture(state: &AppState) -> Self {
        let mut settings = state.settings.read().await.clone();
        if !settings.assistant.persist_api_key {
            settings.assistant.api_key.clear();
        }
        Self {
            settings,
            decks: state.decks.read().await.clone(),
            cards: state.cards.read().await.clone(),
            stats: Some(state.stats.read().await.clone()),
        }
    }
}

fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOT_FILE)
}

/// Load the snapshot from the data directory, or start fresh
pub fn load_snapshot(data_dir: &Path) -> Result<Snapshot> {
    let path = snapshot_path(data_dir);
    if !path.exists() {
        tracing::info!("No snapshot at {}, starting fresh", path.display());
        return Ok(Snapshot {
            settings: Settings::new(),
            decks: Vec::new(),
            cards: CardStore::new(),
            stats: None,
        });
    }
    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_snapshot(&data)
}

/// Parse a snapshot document, overlaying onto defaults
pub fn parse_snapshot(data: &str) -> Result<Snapshot> {
    serde_json::from_str(data).context("Failed to parse snapshot")
}

/// Persist the whole state. Called after every mutation.
pub async fn save(state: &AppState) -> Result<()> {
    let snapshot = Snapshot::capture(state).await;
    write_snapshot(&state.data_dir, &snapshot)
}

pub fn write_snapshot(data_dir: &Path, snapshot: &Snapshot) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let path = snapshot_path(data_dir);
    let data = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    std::fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export the state to an arbitrary path (same redaction rules as save)
pub async fn export(state: &AppState, path: &Path) -> Result<()> {
    let snapshot = Snapshot::capture(state).await;
    let data = serde_json::to_string_pretty(&snapshot).context("Failed to serialize export")?;
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Delete the persisted snapshot (full data wipe)
pub fn wipe(data_dir: &Path) -> Result<()> {
    let path = snapshot_path(data_dir);
    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Build the initial app state from a loaded snapshot, rolling the stats
/// record over to today
pub fn into_state(data_dir: PathBuf, snapshot: Snapshot) -> AppState {
    let stats = snapshot
        .stats
        .unwrap_or_else(|| DailyStats::new(today()))
        .rolled_over(today());
    AppState::new(
        data_dir,
        snapshot.settings,
        snapshot.cards,
        snapshot.decks,
        stats,
    )
}
