mod client;
mod import;

pub use client::DeckClient;
pub use import::parse_wordlist;

use serde::{Deserialize, Serialize};

/// A fetchable deck: id, display title, and the URL of its JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSource {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Deck descriptor kept in app state; used only to filter the card pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub title: String,
    pub size: usize,
    pub enabled: bool,
}

/// One vocabulary row as it appears in deck documents and wordlists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Wire shape of a fetched deck document
#[derive(Debug, Clone, Deserialize)]
pub struct DeckDocument {
    pub title: String,
    pub entries: Vec<WordEntry>,
}
