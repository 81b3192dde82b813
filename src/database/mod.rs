//! Review state storage.
//!
//! [`ReviewStore`] is the seam between the scheduler and persistence. Two
//! backends ship with the crate: a volatile [`MemoryStore`] and a SQLite
//! backed [`SqliteStore`].

pub mod db;
pub mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use crate::models::ReviewState;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Review store lock poisoned")]
    Poisoned,
}

/// Item id → review state mapping plus the per-day review counter.
///
/// Stores do not synchronize read-modify-write sequences themselves; callers
/// that need per-item atomicity hold exclusive access across `get` and `put`.
pub trait ReviewStore: Send {
    /// Stored state, or a fresh default that is not persisted.
    fn get(&self, item_id: &str) -> StoreResult<ReviewState>;

    /// Inserts or replaces the state keyed by `state.item_id`.
    fn put(&mut self, state: &ReviewState) -> StoreResult<()>;

    /// Removes the state. Missing ids are not an error.
    fn delete(&mut self, item_id: &str) -> StoreResult<()>;

    /// Ids whose next review is at or before `as_of`, or was never set. Sorted.
    fn due_set(&self, as_of: DateTime<Utc>) -> StoreResult<Vec<String>>;

    /// Every stored state, sorted by item id.
    fn all(&self) -> StoreResult<Vec<ReviewState>>;

    /// Bumps the counter for `day`, the UTC calendar date of the review instant
    /// (not the process-local date).
    fn record_review(&mut self, day: NaiveDate) -> StoreResult<()>;

    fn reviews_on(&self, day: NaiveDate) -> StoreResult<u32>;

    /// Drops daily counters dated strictly before `day`. Returns how many went.
    fn prune_daily_before(&mut self, day: NaiveDate) -> StoreResult<usize>;
}
