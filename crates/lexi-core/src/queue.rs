use std::collections::{BTreeSet, VecDeque};

use chrono::NaiveDate;
use lexi_config::daily::DailyConfig;

use crate::card::CardStore;
use crate::leitner::is_due;

/// Ordered study/review queues of store keys, popped front to back.
/// Rebuilt from scratch; never persisted.
#[derive(Debug, Default, Clone)]
pub struct Queues {
    pub study: VecDeque<String>,
    pub review: VecDeque<String>,
}

impl Queues {
    pub fn is_empty(&self) -> bool {
        self.study.is_empty() && self.review.is_empty()
    }
}

/// Partition the visible card pool into today's queues.
///
/// The review queue is sliced from the same due list as the study queue's
/// review tail, so a card can appear in both. That overlap is intended
/// behavior, not deduplicated.
pub fn build(
    store: &CardStore,
    enabled_decks: &BTreeSet<String>,
    daily: &DailyConfig,
    learned_today: u32,
    today: NaiveDate,
) -> Queues {
    let remaining = daily.new_per_day.saturating_sub(learned_today);
    let new_count = (remaining as f64 * daily.ratio).round() as usize;
    let review_count = (daily.new_per_day as usize).saturating_sub(new_count).max(1);

    let mut due: Vec<(&String, NaiveDate)> = store
        .filtered(enabled_decks)
        .filter_map(|(key, card)| {
            let schedule = card.schedule?;
            is_due(card, today).then_some((key, schedule.due))
        })
        .collect();
    // stable: ties stay in store (key) order
    due.sort_by_key(|(_, due)| *due);

    let unseen: Vec<&String> = store
        .filtered(enabled_decks)
        .filter(|(_, card)| card.schedule.is_none())
        .map(|(key, _)| key)
        .take(new_count)
        .collect();

    let study: VecDeque<String> = unseen
        .iter()
        .map(|key| (*key).clone())
        .chain(
            due.iter()
                .take(review_count)
                .map(|(key, _)| (*key).clone()),
        )
        .collect();

    let review: VecDeque<String> = due
        .iter()
        .take(review_count)
        .map(|(key, _)| (*key).clone())
        .collect();

    Queues { study, review }
}
