use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::CardStore;
use crate::error::CoreError;
use crate::spelling::{self, SpellCheck};

/// Words per challenge
pub const CHALLENGE_SIZE: usize = 10;

const MAX_STARS: u8 = 3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
        Tier::Master,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::Master => "Master",
        }
    }

    fn up(self) -> Tier {
        Tier::ALL[(self.index() + 1).min(Tier::ALL.len() - 1)]
    }

    fn down(self) -> Tier {
        Tier::ALL[self.index().saturating_sub(1)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderState {
    pub tier: Tier,
    /// Sub-level within the tier, 1..=3
    pub stars: u8,
    pub wins: u32,
    pub losses: u32,
}

impl Default for LadderState {
    fn default() -> Self {
        Self {
            tier: Tier::Bronze,
            stars: 1,
            wins: 0,
            losses: 0,
        }
    }
}

impl LadderState {
    /// Fold a challenge outcome into the ladder.
    ///
    /// A win past three stars promotes, except at Master where stars stay
    /// capped at one. Bronze and Master never lose stars; elsewhere dropping
    /// below one star demotes back to three.
    pub fn record(self, win: bool) -> LadderState {
        let mut next = self;
        if win {
            next.wins += 1;
            if next.tier == Tier::Master {
                next.stars = 1;
            } else {
                next.stars += 1;
                if next.stars > MAX_STARS {
                    next.tier = next.tier.up();
                    next.stars = 1;
                }
            }
        } else {
            next.losses += 1;
            if next.tier != Tier::Bronze && next.tier != Tier::Master {
                if next.stars > 1 {
                    next.stars -= 1;
                } else {
                    next.tier = next.tier.down();
                    next.stars = MAX_STARS;
                }
            }
        }
        next
    }
}

/// Synthetic opponent: a base score from the ladder position plus a uniform
/// jitter, floored at 100
pub fn opponent_score(ladder: &LadderState, rng: &mut impl Rng) -> i64 {
    let base = 500 + ladder.tier.index() as i64 * 100 + (ladder.stars as i64 - 1) * 30;
    (base + rng.gen_range(-50..=50)).max(100)
}

#[derive(Debug, Clone)]
pub struct ChallengeWord {
    pub word: String,
    pub meaning: String,
}

/// One timed spelling duel against the synthetic opponent. Ephemeral: once
/// resolved it only survives as a `LadderState` update.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub id: Uuid,
    words: Vec<ChallengeWord>,
    pub opponent_score: i64,
    pub started: DateTime<Utc>,
    index: usize,
    correct: usize,
}

#[derive(Debug, Clone)]
pub struct ChallengeResult {
    pub user_score: i64,
    pub opponent_score: i64,
    pub correct: usize,
    pub total: usize,
    pub win: bool,
}

impl Challenge {
    /// Sample `count` distinct studied cards and capture the opponent.
    /// Too few studied cards is a recoverable error; nothing is created.
    pub fn start(
        store: &CardStore,
        count: usize,
        ladder: &LadderState,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> Result<Challenge, CoreError> {
        let mut pool: Vec<ChallengeWord> = store
            .iter()
            .filter(|(_, card)| card.schedule.is_some())
            .map(|(_, card)| ChallengeWord {
                word: card.word.clone(),
                meaning: card.meaning.clone(),
            })
            .collect();

        if pool.len() < count {
            return Err(CoreError::NotEnoughStudied {
                needed: count,
                have: pool.len(),
            });
        }

        pool.shuffle(rng);
        pool.truncate(count);

        Ok(Challenge {
            id: Uuid::new_v4(),
            words: pool,
            opponent_score: opponent_score(ladder, rng),
            started: now,
            index: 0,
            correct: 0,
        })
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// The meaning to prompt with next, if any words remain
    pub fn current(&self) -> Option<&ChallengeWord> {
        self.words.get(self.index)
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.words.len()
    }

    /// Check a guess against the current word and advance. Empty guesses
    /// and answers after completion are ignored.
    pub fn answer(&mut self, guess: &str) -> Option<SpellCheck> {
        let current = self.words.get(self.index)?;
        let outcome = spelling::check(guess, &current.word)?;
        if outcome.accepted {
            self.correct += 1;
        }
        self.index += 1;
        Some(outcome)
    }

    /// Score the finished run: correct rate scaled to 1000, minus elapsed
    /// seconds, floored
    pub fn resolve(&self, now: DateTime<Utc>) -> ChallengeResult {
        let elapsed = (now - self.started).num_seconds().max(0);
        let rate = if self.words.is_empty() {
            0.0
        } else {
            self.correct as f64 / self.words.len() as f64
        };
        let user_score = (rate * 1000.0 - elapsed as f64).floor() as i64;

        ChallengeResult {
            user_score,
            opponent_score: self.opponent_score,
            correct: self.correct,
            total: self.words.len(),
            win: user_score > self.opponent_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{BoxLevel, Card, Schedule};
    use chrono::{Duration, NaiveDate, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn studied_store(count: usize) -> CardStore {
        let mut store = CardStore::new();
        for i in 0..count {
            let mut card = Card::new(format!("word{i:02}"), format!("meaning{i:02}"));
            card.schedule = Some(Schedule {
                level: BoxLevel::new(3),
                due: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            });
            store.insert_new(card);
        }
        store
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    #[test]
    fn three_wins_from_bronze_one_promote_to_silver() {
        let mut ladder = LadderState::default();
        ladder = ladder.record(true);
        assert_eq!((ladder.tier, ladder.stars), (Tier::Bronze, 2));
        ladder = ladder.record(true);
        assert_eq!((ladder.tier, ladder.stars), (Tier::Bronze, 3));
        ladder = ladder.record(true);
        assert_eq!((ladder.tier, ladder.stars), (Tier::Silver, 1));
        assert_eq!(ladder.wins, 3);
    }

    #[test]
    fn bronze_floor_is_sticky() {
        let ladder = LadderState::default().record(false);
        assert_eq!((ladder.tier, ladder.stars), (Tier::Bronze, 1));
        assert_eq!(ladder.losses, 1);
    }

    #[test]
    fn master_stars_cap_at_one() {
        let mut ladder = LadderState {
            tier: Tier::Master,
            stars: 1,
            wins: 0,
            losses: 0,
        };
        ladder = ladder.record(true);
        assert_eq!((ladder.tier, ladder.stars), (Tier::Master, 1));
        ladder = ladder.record(false);
        assert_eq!((ladder.tier, ladder.stars), (Tier::Master, 1));
    }

    #[test]
    fn losing_the_last_star_demotes_to_three() {
        let ladder = LadderState {
            tier: Tier::Gold,
            stars: 1,
            wins: 0,
            losses: 0,
        }
        .record(false);
        assert_eq!((ladder.tier, ladder.stars), (Tier::Silver, 3));
    }

    #[test]
    fn opponent_score_tracks_tier_and_floors() {
        let mut rng = StdRng::seed_from_u64(7);
        let bronze = LadderState::default();
        for _ in 0..100 {
            let score = opponent_score(&bronze, &mut rng);
            assert!((450..=550).contains(&score));
        }
        let diamond = LadderState {
            tier: Tier::Diamond,
            stars: 3,
            wins: 0,
            losses: 0,
        };
        for _ in 0..100 {
            let score = opponent_score(&diamond, &mut rng);
            assert!((910..=1010).contains(&score));
        }
    }

    #[test]
    fn insufficient_pool_is_an_error_without_state_change() {
        let store = studied_store(CHALLENGE_SIZE - 1);
        let ladder = LadderState::default();
        let mut rng = StdRng::seed_from_u64(1);
        let result = Challenge::start(&store, CHALLENGE_SIZE, &ladder, &mut rng, now());
        assert!(matches!(
            result,
            Err(CoreError::NotEnoughStudied { needed: 10, have: 9 })
        ));
    }

    #[test]
    fn challenge_samples_distinct_words() {
        let store = studied_store(30);
        let ladder = LadderState::default();
        let mut rng = StdRng::seed_from_u64(42);
        let challenge =
            Challenge::start(&store, CHALLENGE_SIZE, &ladder, &mut rng, now()).unwrap();
        assert_eq!(challenge.total(), CHALLENGE_SIZE);

        let mut seen: Vec<&str> = challenge.words.iter().map(|w| w.word.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), CHALLENGE_SIZE);
    }

    #[test]
    fn perfect_fast_run_beats_the_opponent() {
        let store = studied_store(12);
        let ladder = LadderState::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut challenge =
            Challenge::start(&store, CHALLENGE_SIZE, &ladder, &mut rng, now()).unwrap();

        while let Some(word) = challenge.current().cloned() {
            let outcome = challenge.answer(&word.word).unwrap();
            assert!(outcome.accepted);
        }
        assert!(challenge.is_complete());

        let result = challenge.resolve(now() + Duration::seconds(30));
        assert_eq!(result.correct, CHALLENGE_SIZE);
        assert_eq!(result.user_score, 970);
        assert!(result.win);
    }

    #[test]
    fn blank_answers_do_not_advance() {
        let store = studied_store(12);
        let ladder = LadderState::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut challenge =
            Challenge::start(&store, CHALLENGE_SIZE, &ladder, &mut rng, now()).unwrap();
        assert!(challenge.answer("  ").is_none());
        assert_eq!(challenge.position(), 0);
    }
}
