use chrono::{Duration, NaiveDate};

use crate::card::{BoxLevel, Card, Schedule};

/// Days until the next review, indexed by box
pub const INTERVAL_NORMAL: [i64; 5] = [1, 2, 4, 7, 15];
/// Longer spacing for strong passes
pub const INTERVAL_STRONG: [i64; 5] = [2, 4, 7, 15, 30];

/// Apply a grade (1..=5) to a card's schedule.
///
/// Fail (grade <= 2) drops the card back to box 1 on the first normal
/// interval. Pass (3..=4) bumps the box and schedules on the normal table;
/// a strong pass (5) bumps the box and schedules on the strong table.
/// A card never graded before starts from box 1.
pub fn advance(current: Option<Schedule>, grade: u8, today: NaiveDate) -> Schedule {
    let level = current.map(|s| s.level).unwrap_or(BoxLevel::FIRST);

    if grade <= 2 {
        return Schedule {
            level: BoxLevel::FIRST,
            due: today + Duration::days(INTERVAL_NORMAL[0]),
        };
    }

    let level = level.bump();
    let table = if grade <= 4 {
        &INTERVAL_NORMAL
    } else {
        &INTERVAL_STRONG
    };
    let days = table[(level.get() - 1) as usize];

    Schedule {
        level,
        due: today + Duration::days(days),
    }
}

/// A card with no schedule is due immediately; otherwise due on or after
/// its due date, calendar-day granularity.
pub fn is_due(card: &Card, date: NaiveDate) -> bool {
    match card.schedule {
        None => true,
        Some(schedule) => schedule.due <= date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn fail_resets_to_first_box_from_anywhere() {
        let today = day("2026-08-06");
        for level in 1..=5 {
            for grade in [1, 2] {
                let current = Some(Schedule {
                    level: BoxLevel::new(level),
                    due: today,
                });
                let next = advance(current, grade, today);
                assert_eq!(next.level, BoxLevel::FIRST);
                assert_eq!(next.due, day("2026-08-07"));
            }
        }
    }

    #[test]
    fn pass_bumps_box_and_caps_at_five() {
        let today = day("2026-08-06");
        for level in 1..=5u8 {
            let current = Some(Schedule {
                level: BoxLevel::new(level),
                due: today,
            });
            let next = advance(current, 4, today);
            assert_eq!(next.level.get(), (level + 1).min(5));
            let expected = INTERVAL_NORMAL[(next.level.get() - 1) as usize];
            assert_eq!(next.due, today + Duration::days(expected));
        }
    }

    #[test]
    fn strong_pass_uses_longer_table() {
        let today = day("2026-08-06");
        let current = Some(Schedule {
            level: BoxLevel::new(2),
            due: today,
        });
        let next = advance(current, 5, today);
        assert_eq!(next.level.get(), 3);
        assert_eq!(next.due, today + Duration::days(INTERVAL_STRONG[2]));
    }

    #[test]
    fn unseen_card_starts_from_box_one() {
        let today = day("2026-08-06");
        let next = advance(None, 3, today);
        assert_eq!(next.level.get(), 2);
        assert_eq!(next.due, today + Duration::days(INTERVAL_NORMAL[1]));
    }

    #[test]
    fn due_predicate() {
        let today = day("2026-08-06");
        let mut card = Card::new("apple", "fruit");
        assert!(is_due(&card, today));

        card.schedule = Some(Schedule {
            level: BoxLevel::FIRST,
            due: day("2026-08-06"),
        });
        assert!(is_due(&card, today));

        card.schedule = Some(Schedule {
            level: BoxLevel::FIRST,
            due: day("2026-08-07"),
        });
        assert!(!is_due(&card, today));
    }
}
