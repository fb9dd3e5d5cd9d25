use lexi_config::ranks::RankTier;

use crate::card::CardStore;

/// Cumulative skill score: sum of box levels over every studied card
pub fn total_score(store: &CardStore) -> u32 {
    store
        .iter()
        .filter_map(|(_, card)| card.schedule)
        .map(|schedule| schedule.level.get() as u32)
        .sum()
}

/// Label of the highest tier whose threshold the score reaches,
/// falling back to the lowest tier
pub fn rank_label<'a>(score: u32, tiers: &'a [RankTier]) -> &'a str {
    let best = tiers
        .iter()
        .filter(|tier| tier.min_score <= score)
        .max_by_key(|tier| tier.min_score);

    match best {
        Some(tier) => &tier.label,
        None => tiers
            .iter()
            .min_by_key(|tier| tier.min_score)
            .map(|tier| tier.label.as_str())
            .unwrap_or(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{BoxLevel, Card, CardStore, Schedule};
    use chrono::NaiveDate;
    use lexi_config::ranks::RankConfig;

    fn store_with_levels(levels: &[u8]) -> CardStore {
        let mut store = CardStore::new();
        for (i, level) in levels.iter().enumerate() {
            let mut card = Card::new(format!("word{i}"), "m");
            card.schedule = Some(Schedule {
                level: BoxLevel::new(*level),
                due: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            });
            store.insert_new(card);
        }
        store
    }

    #[test]
    fn score_sums_boxes_and_ignores_unseen() {
        let mut store = store_with_levels(&[1, 3, 5]);
        store.insert_new(Card::new("unseen", "m"));
        assert_eq!(total_score(&store), 9);
    }

    #[test]
    fn zero_score_resolves_to_lowest_tier() {
        let config = RankConfig::new();
        assert_eq!(rank_label(0, &config.tiers), "Novice");
    }

    #[test]
    fn exact_threshold_resolves_to_that_tier() {
        let config = RankConfig::new();
        assert_eq!(rank_label(50, &config.tiers), "Apprentice");
        assert_eq!(rank_label(49, &config.tiers), "Novice");
        assert_eq!(rank_label(800, &config.tiers), "Sage");
    }
}
