//! Volatile in-process review store.

use super::{ReviewStore, StoreResult};
use crate::models::ReviewState;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct MemoryStore {
    states: HashMap<String, ReviewState>,
    daily_reviews: BTreeMap<NaiveDate, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewStore for MemoryStore {
    fn get(&self, item_id: &str) -> StoreResult<ReviewState> {
        Ok(self
            .states
            .get(item_id)
            .cloned()
            .unwrap_or_else(|| ReviewState::new(item_id)))
    }

    fn put(&mut self, state: &ReviewState) -> StoreResult<()> {
        self.states.insert(state.item_id.clone(), state.clone());
        Ok(())
    }

    fn delete(&mut self, item_id: &str) -> StoreResult<()> {
        self.states.remove(item_id);
        Ok(())
    }

    fn due_set(&self, as_of: DateTime<Utc>) -> StoreResult<Vec<String>> {
        let mut due: Vec<String> = self
            .states
            .values()
            .filter(|state| state.is_due(as_of))
            .map(|state| state.item_id.clone())
            .collect();
        due.sort();
        Ok(due)
    }

    fn all(&self) -> StoreResult<Vec<ReviewState>> {
        let mut states: Vec<ReviewState> = self.states.values().cloned().collect();
        states.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        Ok(states)
    }

    fn record_review(&mut self, day: NaiveDate) -> StoreResult<()> {
        let count = self.daily_reviews.entry(day).or_insert(0);
        *count = count.saturating_add(1);
        Ok(())
    }

    fn reviews_on(&self, day: NaiveDate) -> StoreResult<u32> {
        Ok(self.daily_reviews.get(&day).copied().unwrap_or(0))
    }

    fn prune_daily_before(&mut self, day: NaiveDate) -> StoreResult<usize> {
        let kept = self.daily_reviews.split_off(&day);
        let removed = self.daily_reviews.len();
        self.daily_reviews = kept;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::contract;

    #[test]
    fn test_get_missing_returns_default() {
        contract::get_missing_returns_default(&mut MemoryStore::new());
    }

    #[test]
    fn test_put_then_get() {
        contract::put_then_get(&mut MemoryStore::new());
    }

    #[test]
    fn test_delete_is_idempotent() {
        contract::delete_is_idempotent(&mut MemoryStore::new());
    }

    #[test]
    fn test_due_set() {
        contract::due_set_semantics(&mut MemoryStore::new());
    }

    #[test]
    fn test_all_is_sorted() {
        contract::all_is_sorted(&mut MemoryStore::new());
    }

    #[test]
    fn test_daily_counter() {
        contract::daily_counter(&mut MemoryStore::new());
    }
}
