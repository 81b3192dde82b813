//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each item has an ease factor (EF) that adjusts based on performance
//! - Grades 0-2: Reset interval and repetitions (item needs relearning)
//! - Grades 3-5: Increase interval progressively (1 day → 6 days → EF multiplier)
//! - EF is adjusted after each review and has a minimum value of 1.3 but no maximum
//! - Difficulty drifts up on failures and down on strong recalls, bounded to [0.5, 5.0]

use super::{Grade, ReviewState};
use chrono::{DateTime, Days, Utc};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MIN_DIFFICULTY: f64 = 0.5;
pub const MAX_DIFFICULTY: f64 = 5.0;

const FAILURE_DIFFICULTY_FACTOR: f64 = 1.1;
const SUCCESS_DIFFICULTY_FACTOR: f64 = 0.95;

/// Applies one graded review to `state` at instant `now` and returns the new state.
///
/// Pure: the result depends only on the arguments.
pub fn apply_grade(state: &ReviewState, grade: Grade, now: DateTime<Utc>) -> ReviewState {
    let mut next = state.clone();

    next.total_reviews = state.total_reviews.saturating_add(1);
    next.last_review = Some(now);

    if grade.is_pass() {
        next.correct_streak = state.correct_streak.saturating_add(1);
        next.interval = match state.repetitions {
            0 => 1,
            1 => 6,
            // Uses the ease factor from before this review's update
            _ => ((state.interval as f64 * state.ease_factor).round() as u32).max(1),
        };
        next.repetitions = state.repetitions.saturating_add(1);
    } else {
        next.correct_streak = 0;
        next.repetitions = 0;
        next.interval = 1;
    }

    next.ease_factor = next_ease_factor(state.ease_factor, grade);
    next.difficulty = next_difficulty(state.difficulty, grade);

    next.next_review = Some(
        now.checked_add_days(Days::new(next.interval as u64))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    );

    next
}

/// EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), floored at 1.3.
fn next_ease_factor(ease_factor: f64, grade: Grade) -> f64 {
    let miss = 5.0 - grade.value() as f64;
    let updated = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
    updated.max(MIN_EASE_FACTOR)
}

fn next_difficulty(difficulty: f64, grade: Grade) -> f64 {
    let updated = if !grade.is_pass() {
        difficulty * FAILURE_DIFFICULTY_FACTOR
    } else if grade.value() > 3 {
        difficulty * SUCCESS_DIFFICULTY_FACTOR
    } else {
        difficulty
    };
    updated.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(n)
    }

    fn grade(raw: i64) -> Grade {
        Grade::new(raw).unwrap()
    }

    #[test]
    fn test_first_review() {
        let state = ReviewState::new("wort");

        let next = apply_grade(&state, grade(4), day(0));
        assert_eq!(next.interval, 1);
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.total_reviews, 1);
        assert_eq!(next.correct_streak, 1);
        assert_eq!(next.last_review, Some(day(0)));
        assert_eq!(next.next_review, Some(day(1)));
    }

    #[test]
    fn test_three_review_scenario() {
        let state = ReviewState::new("wort");

        let first = apply_grade(&state, grade(4), day(0));
        assert_eq!(first.interval, 1);
        assert_eq!(first.repetitions, 1);
        assert_eq!(first.next_review, Some(day(1)));

        let second = apply_grade(&first, grade(4), day(1));
        assert_eq!(second.interval, 6);
        assert_eq!(second.repetitions, 2);
        assert_eq!(second.next_review, Some(day(7)));
        assert!((second.ease_factor - 2.5).abs() < 1e-9);

        let third = apply_grade(&second, grade(5), day(7));
        // round(6 * 2.5)
        assert_eq!(third.interval, 15);
        assert_eq!(third.repetitions, 3);
        assert_eq!(third.next_review, Some(day(22)));
        assert!((third.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_passing_interval_sequence() {
        for raw in 3..=5 {
            let mut state = ReviewState::new("folge");
            let mut now = day(0);
            let mut expected = Vec::new();
            let mut actual = Vec::new();

            for step in 0..6 {
                let next_interval = match step {
                    0 => 1,
                    1 => 6,
                    _ => ((state.interval as f64) * state.ease_factor).round() as u32,
                };
                expected.push(next_interval);

                state = apply_grade(&state, grade(raw), now);
                actual.push(state.interval);
                now = state.next_review.unwrap();
            }

            assert_eq!(actual, expected, "grade {raw}");
        }
    }

    #[test]
    fn test_failing_grade_resets() {
        let mut state = ReviewState::new("vergessen");
        state.repetitions = 5;
        state.interval = 20;
        state.ease_factor = 2.0;
        state.correct_streak = 5;
        state.total_reviews = 5;

        let next = apply_grade(&state, grade(1), day(0));
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval, 1);
        assert_eq!(next.correct_streak, 0);
        assert_eq!(next.total_reviews, 6);
        assert!((next.difficulty - 1.1).abs() < 1e-9);
        // 2.0 + 0.1 - 4 * (0.08 + 4 * 0.02)
        assert!((next.ease_factor - 1.46).abs() < 1e-9);
    }

    #[test]
    fn test_every_failing_grade_resets() {
        for raw in 0..=2 {
            let mut state = ReviewState::new("nochmal");
            state.repetitions = 3;
            state.interval = 40;

            let next = apply_grade(&state, grade(raw), day(0));
            assert_eq!(next.repetitions, 0, "grade {raw}");
            assert_eq!(next.interval, 1, "grade {raw}");
        }
    }

    #[test]
    fn test_first_success_after_reset_ignores_old_interval() {
        let mut state = ReviewState::new("neu");
        state.repetitions = 0;
        state.interval = 30;

        let next = apply_grade(&state, grade(5), day(0));
        assert_eq!(next.interval, 1);
    }

    #[test]
    fn test_grade_three_keeps_difficulty() {
        let mut state = ReviewState::new("mittel");
        state.difficulty = 2.0;

        let next = apply_grade(&state, grade(3), day(0));
        assert_eq!(next.difficulty, 2.0);
        assert_eq!(next.correct_streak, 1);
        assert_eq!(next.repetitions, 1);
    }

    #[test]
    fn test_ef_floor() {
        let mut state = ReviewState::new("schwer");
        state.ease_factor = 1.3;

        let next = apply_grade(&state, grade(0), day(0));
        assert_eq!(next.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_ef_has_no_ceiling() {
        let mut state = ReviewState::new("leicht");
        for n in 0..10 {
            state = apply_grade(&state, grade(5), day(n));
        }
        assert!(state.ease_factor > 2.5);
    }

    #[test]
    fn test_bounds_hold_over_long_sequences() {
        let patterns: [&[i64]; 4] = [&[0], &[5], &[0, 1, 2, 3, 4, 5], &[5, 0, 3, 1, 4, 2, 2]];

        for pattern in patterns {
            let mut state = ReviewState::new("grenze");
            for n in 0..200 {
                let raw = pattern[n % pattern.len()];
                state = apply_grade(&state, grade(raw), day(n as i64));

                assert!(state.ease_factor >= MIN_EASE_FACTOR);
                assert!(state.difficulty >= MIN_DIFFICULTY);
                assert!(state.difficulty <= MAX_DIFFICULTY);
                assert!(state.interval >= 1);
            }
        }
    }

    #[test]
    fn test_difficulty_saturates() {
        let mut failing = ReviewState::new("a");
        let mut passing = ReviewState::new("b");
        for n in 0..100 {
            failing = apply_grade(&failing, grade(0), day(n));
            passing = apply_grade(&passing, grade(5), day(n));
        }
        assert_eq!(failing.difficulty, MAX_DIFFICULTY);
        assert_eq!(passing.difficulty, MIN_DIFFICULTY);
    }

    #[test]
    fn test_deterministic() {
        let mut state = ReviewState::new("gleich");
        state.repetitions = 4;
        state.interval = 12;
        state.ease_factor = 2.2;

        let a = apply_grade(&state, grade(4), day(3));
        let b = apply_grade(&state, grade(4), day(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_next_review_keeps_time_of_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 23, 30, 0).unwrap();
        let mut state = ReviewState::new("schaltjahr");
        state.repetitions = 1;

        let next = apply_grade(&state, grade(4), now);
        assert_eq!(
            next.next_review,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap())
        );
    }
}
