//! Review submission and progress queries over a shared store.
//!
//! The store sits behind a single mutex, so each submission's
//! get → apply → put → count sequence is atomic with respect to every other
//! caller, including writers of the same item.

use crate::database::{ReviewStore, StoreError};
use crate::error::{ReviewError, ReviewResult};
use crate::models::{
    Clock, Grade, ReviewState, ReviewStats, apply_grade, format_next_review,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Result of one graded review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub state: ReviewState,
    pub next_review_formatted: String,
    pub message: String,
}

pub struct ReviewService {
    store: Mutex<Box<dyn ReviewStore>>,
    clock: Arc<dyn Clock>,
    daily_retention_days: Option<u64>,
}

impl ReviewService {
    pub fn new(store: Box<dyn ReviewStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
            daily_retention_days: None,
        }
    }

    /// Keeps only the last `days` days of the daily review counter.
    pub fn with_daily_retention(mut self, days: u64) -> Self {
        self.daily_retention_days = Some(days);
        self
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, Box<dyn ReviewStore>>, StoreError> {
        self.store.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Applies a grade to an item and persists the result.
    ///
    /// The grade is validated before the store is touched.
    pub fn review(&self, item_id: &str, raw_grade: i64) -> ReviewResult<ReviewOutcome> {
        let grade = Grade::new(raw_grade)?;
        if item_id.trim().is_empty() {
            return Err(ReviewError::MalformedInput(
                "item_id must not be empty".to_string(),
            ));
        }

        let now = self.clock.now();
        // UTC calendar date
        let today = now.date_naive();

        let state = {
            let mut store = self.lock_store()?;
            let current = store.get(item_id)?;
            let state = apply_grade(&current, grade, now);
            store.put(&state)?;
            store.record_review(today)?;

            if let Some(cutoff) = self.retention_cutoff(today) {
                let pruned = store.prune_daily_before(cutoff)?;
                if pruned > 0 {
                    debug!(pruned, %cutoff, "Pruned daily review counters");
                }
            }
            state
        };

        info!(
            item_id,
            grade = grade.value(),
            interval = state.interval,
            repetitions = state.repetitions,
            ease_factor = state.ease_factor,
            "Review recorded"
        );

        Ok(ReviewOutcome {
            next_review_formatted: format_next_review(state.next_review, now),
            message: grade.feedback_message().to_string(),
            state,
        })
    }

    fn retention_cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        let days = self.daily_retention_days?;
        today.checked_sub_days(Days::new(days))
    }

    /// Current state of an item, or its default if unseen. Never persists.
    pub fn state(&self, item_id: &str) -> ReviewResult<ReviewState> {
        debug!(item_id, "Fetching review state");
        Ok(self.lock_store()?.get(item_id)?)
    }

    /// Ids of items due right now, sorted.
    pub fn due_items(&self) -> ReviewResult<Vec<String>> {
        let now = self.clock.now();
        let due = self.lock_store()?.due_set(now)?;
        debug!(count = due.len(), "Fetched due items");
        Ok(due)
    }

    pub fn stats(&self) -> ReviewResult<ReviewStats> {
        let now = self.clock.now();
        let store = self.lock_store()?;

        let states = store.all()?;
        let due_items = store.due_set(now)?.len();
        let reviewed_today = store.reviews_on(now.date_naive())?;

        Ok(ReviewStats::compute(&states, due_items, reviewed_today))
    }

    /// Forgets an item's progress. Succeeds whether or not the item existed.
    pub fn reset(&self, item_id: &str) -> ReviewResult<()> {
        self.lock_store()?.delete(item_id)?;
        info!(item_id, "Review state reset");
        Ok(())
    }

    pub fn export_snapshot(&self) -> ReviewResult<Vec<ReviewState>> {
        Ok(self.lock_store()?.all()?)
    }

    /// Loads states into the store, replacing any with the same id.
    ///
    /// Every state is checked before the first write, so a snapshot with one
    /// bad record leaves the store untouched.
    pub fn import_snapshot(&self, states: &[ReviewState]) -> ReviewResult<usize> {
        for state in states {
            state
                .check_bounds()
                .map_err(|reason| ReviewError::InvalidState {
                    item_id: state.item_id.clone(),
                    reason,
                })?;
        }

        let mut store = self.lock_store()?;
        for state in states {
            store.put(state)?;
        }
        info!(count = states.len(), "Imported review states");
        Ok(states.len())
    }
}
