use anyhow::{Context, Result};

use crate::{DeckDocument, DeckSource};

#[derive(Clone, Default)]
pub struct DeckClient {
    client: reqwest::Client,
}

impl DeckClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch one deck document
    pub async fn fetch_deck(&self, source: &DeckSource) -> Result<DeckDocument> {
        let response = self
            .client
            .get(&source.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch deck '{}'", source.id))?
            .error_for_status()
            .with_context(|| format!("Deck '{}' returned an error status", source.id))?;

        response
            .json::<DeckDocument>()
            .await
            .with_context(|| format!("Failed to parse deck '{}'", source.id))
    }

    /// Fetch every source, skipping the ones that fail. A missing deck is
    /// absent, never fatal: startup proceeds with whatever loaded.
    pub async fn fetch_all(&self, sources: &[DeckSource]) -> Vec<(DeckSource, DeckDocument)> {
        let mut loaded = Vec::new();
        for source in sources {
            match self.fetch_deck(source).await {
                Ok(document) => {
                    tracing::info!(
                        "Loaded deck '{}' with {} entries",
                        source.id,
                        document.entries.len()
                    );
                    loaded.push((source.clone(), document));
                }
                Err(e) => {
                    tracing::warn!("Skipping deck '{}': {e:#}", source.id);
                }
            }
        }
        loaded
    }
}
