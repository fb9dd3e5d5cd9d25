use serde::{Deserialize, Serialize};

/// One rank tier: the label earned at `min_score` and above
#[derive(Clone, Serialize, Deserialize)]
pub struct RankTier {
    pub label: String,
    pub min_score: u32,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Tier table, must contain a zero-threshold tier
    pub tiers: Vec<RankTier>,
}

impl RankConfig {
    pub fn new() -> Self {
        let tiers = [
            ("Novice", 0),
            ("Apprentice", 50),
            ("Scholar", 150),
            ("Expert", 400),
            ("Sage", 800),
        ]
        .into_iter()
        .map(|(label, min_score)| RankTier {
            label: label.to_string(),
            min_score,
        })
        .collect();

        Self { tiers }
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self::new()
    }
}
