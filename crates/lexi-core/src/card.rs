use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;

/// Leitner box, 1 (weakest) to 5 (strongest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxLevel(u8);

impl BoxLevel {
    pub const FIRST: BoxLevel = BoxLevel(1);
    pub const LAST: BoxLevel = BoxLevel(5);

    pub fn new(level: u8) -> Self {
        Self(level.clamp(1, 5))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One box up, saturating at the last box
    pub fn bump(self) -> Self {
        Self::new(self.0 + 1)
    }
}

/// Repetition state of a card that has been graded at least once.
/// A card that was never studied has no `Schedule` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub level: BoxLevel,
    pub due: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Originating deck id, absent for cards imported without a deck
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl Card {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            example: None,
            deck: None,
            schedule: None,
        }
    }

    pub fn key(&self) -> String {
        normalize_key(&self.word)
    }
}

/// Store key: trimmed, NFC-normalized, lowercased word
pub fn normalize_key(word: &str) -> String {
    word.trim().nfc().collect::<String>().to_lowercase()
}

/// All cards, keyed by normalized word. BTreeMap keeps iteration order
/// stable, which the queue builder relies on for unseen-card selection.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardStore {
    cards: BTreeMap<String, Card>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&Card> {
        self.cards.get(&normalize_key(word))
    }

    /// Insert a card unless one with the same key already exists.
    /// Deck loads and imports never overwrite accumulated progress.
    pub fn insert_new(&mut self, card: Card) -> bool {
        let key = card.key();
        if self.cards.contains_key(&key) {
            return false;
        }
        self.cards.insert(key, card);
        true
    }

    /// Replace the schedule of an existing card with an advanced one
    pub fn set_schedule(&mut self, word: &str, schedule: Schedule) -> Result<(), CoreError> {
        let card = self
            .cards
            .get_mut(&normalize_key(word))
            .ok_or_else(|| CoreError::UnknownCard(word.to_string()))?;
        card.schedule = Some(schedule);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Card)> {
        self.cards.iter()
    }

    /// Cards visible given the enabled deck set. Cards without a deck tag
    /// always pass the filter.
    pub fn filtered<'a>(
        &'a self,
        enabled: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = (&'a String, &'a Card)> {
        self.cards.iter().filter(move |(_, card)| {
            card.deck
                .as_ref()
                .map(|deck| enabled.contains(deck))
                .unwrap_or(true)
        })
    }

    /// Share of a deck's cards that reached box 2 or beyond, in percent
    pub fn deck_progress(&self, deck_id: &str, declared_size: usize) -> u32 {
        let mut total = 0usize;
        let mut learned = 0usize;
        for card in self.cards.values() {
            if card.deck.as_deref() == Some(deck_id) {
                total += 1;
                if card
                    .schedule
                    .map(|s| s.level.get() >= 2)
                    .unwrap_or(false)
                {
                    learned += 1;
                }
            }
        }
        let total = if total > 0 { total } else { declared_size };
        if total == 0 {
            return 0;
        }
        (learned as f64 / total as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_and_nfc_insensitive() {
        let mut store = CardStore::new();
        assert!(store.insert_new(Card::new("Apple", "fruit")));
        assert!(!store.insert_new(Card::new("apple", "overwrite attempt")));
        assert_eq!(store.get("APPLE").unwrap().meaning, "fruit");

        // "é" composed vs "e" + combining accent
        assert!(store.insert_new(Card::new("caf\u{e9}", "coffee")));
        assert!(!store.insert_new(Card::new("cafe\u{301}", "dup")));
    }

    #[test]
    fn box_level_clamps() {
        assert_eq!(BoxLevel::new(0).get(), 1);
        assert_eq!(BoxLevel::new(9).get(), 5);
        assert_eq!(BoxLevel::LAST.bump(), BoxLevel::LAST);
    }

    #[test]
    fn filter_keeps_untagged_cards() {
        let mut store = CardStore::new();
        let mut tagged = Card::new("alpha", "a");
        tagged.deck = Some("cet4".to_string());
        store.insert_new(tagged);
        store.insert_new(Card::new("beta", "b"));

        let enabled = BTreeSet::new();
        let visible: Vec<_> = store.filtered(&enabled).map(|(k, _)| k.clone()).collect();
        assert_eq!(visible, vec!["beta".to_string()]);
    }
}
