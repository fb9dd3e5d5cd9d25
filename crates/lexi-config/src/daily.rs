use std::env;

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct DailyConfig {
    /// New cards introduced per day
    pub new_per_day: u32,
    /// Share of the remaining quota spent on new cards, 0.0..=1.0
    pub ratio: f64,
}

impl DailyConfig {
    pub fn new() -> Self {
        let new_per_day = env::var("LEXI_NEW_PER_DAY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let ratio = env::var("LEXI_NEW_RATIO")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.5);

        Self { new_per_day, ratio }
    }
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self::new()
    }
}
