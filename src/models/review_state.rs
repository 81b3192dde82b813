//! Per-item spaced repetition state.
use super::sm2::{MAX_DIFFICULTY, MIN_DIFFICULTY, MIN_EASE_FACTOR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INTERVAL_DAYS: u32 = 1;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const DEFAULT_DIFFICULTY: f64 = 1.0;

/// Review progress of one vocabulary item.
///
/// `next_review == None` means the item has never been reviewed and is due
/// immediately.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub item_id: String,
    pub interval: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub next_review: Option<DateTime<Utc>>,
    pub last_review: Option<DateTime<Utc>>,
    pub total_reviews: u32,
    pub correct_streak: u32,
    pub difficulty: f64,
}

impl ReviewState {
    /// Fresh state for an item that has not been seen yet.
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            interval: DEFAULT_INTERVAL_DAYS,
            ease_factor: DEFAULT_EASE_FACTOR,
            repetitions: 0,
            next_review: None,
            last_review: None,
            total_reviews: 0,
            correct_streak: 0,
            difficulty: DEFAULT_DIFFICULTY,
        }
    }

    pub fn is_due(&self, as_of: DateTime<Utc>) -> bool {
        match self.next_review {
            Some(next) => next <= as_of,
            None => true,
        }
    }

    pub fn is_reviewed(&self) -> bool {
        self.total_reviews > 0
    }

    /// Checks the numeric bounds the scheduler maintains. Returns the first
    /// violation found.
    pub fn check_bounds(&self) -> Result<(), String> {
        if self.item_id.trim().is_empty() {
            return Err("item_id must not be empty".to_string());
        }
        if self.interval < 1 {
            return Err(format!("interval must be at least 1, got {}", self.interval));
        }
        if self.ease_factor.is_nan() || self.ease_factor < MIN_EASE_FACTOR {
            return Err(format!(
                "ease_factor must be at least {}, got {}",
                MIN_EASE_FACTOR, self.ease_factor
            ));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(format!(
                "difficulty must be within [{}, {}], got {}",
                MIN_DIFFICULTY, MAX_DIFFICULTY, self.difficulty
            ));
        }
        Ok(())
    }
}
