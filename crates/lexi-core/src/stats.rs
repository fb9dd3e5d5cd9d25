use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ladder::LadderState;

/// Per-day counters plus the cumulative figures that survive rollover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub learned: u32,
    pub reviewed: u32,
    /// Consecutive active days; carried unchanged over idle days
    pub streak: u32,
    pub score: u32,
    pub rank: String,
    #[serde(default)]
    pub ladder: LadderState,
}

impl DailyStats {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today,
            learned: 0,
            reviewed: 0,
            streak: 0,
            score: 0,
            rank: String::new(),
            ladder: LadderState::default(),
        }
    }

    pub fn active(&self) -> bool {
        self.learned > 0 || self.reviewed > 0
    }

    /// Day rollover: the single transition of the tracker. Counters reset,
    /// the streak grows only if the previous day saw activity, and the
    /// cumulative score/rank/ladder carry over untouched.
    pub fn rolled_over(self, today: NaiveDate) -> Self {
        if self.date == today {
            return self;
        }
        let streak = if self.active() {
            self.streak + 1
        } else {
            self.streak
        };
        Self {
            date: today,
            learned: 0,
            reviewed: 0,
            streak,
            ..self
        }
    }

    pub fn record_learned(&mut self) {
        self.learned += 1;
    }

    pub fn record_reviewed(&mut self) {
        self.reviewed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::Tier;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn rollover_resets_counters_and_keeps_cumulative_state() {
        let mut stats = DailyStats::new(day("2026-08-05"));
        stats.learned = 7;
        stats.reviewed = 3;
        stats.streak = 4;
        stats.score = 120;
        stats.rank = "Scholar".to_string();
        stats.ladder.tier = Tier::Gold;
        stats.ladder.stars = 2;

        let rolled = stats.rolled_over(day("2026-08-06"));
        assert_eq!(rolled.date, day("2026-08-06"));
        assert_eq!(rolled.learned, 0);
        assert_eq!(rolled.reviewed, 0);
        assert_eq!(rolled.streak, 5);
        assert_eq!(rolled.score, 120);
        assert_eq!(rolled.rank, "Scholar");
        assert_eq!(rolled.ladder.tier, Tier::Gold);
    }

    #[test]
    fn idle_day_carries_streak_unchanged() {
        let mut stats = DailyStats::new(day("2026-08-05"));
        stats.streak = 4;

        let rolled = stats.rolled_over(day("2026-08-06"));
        assert_eq!(rolled.streak, 4);
    }

    #[test]
    fn same_day_access_is_a_no_op() {
        let mut stats = DailyStats::new(day("2026-08-06"));
        stats.learned = 2;
        let rolled = stats.rolled_over(day("2026-08-06"));
        assert_eq!(rolled.learned, 2);
    }
}
