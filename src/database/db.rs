//! SQLite backed review store
//!
//! Keeps review states and the daily review counter in two tables. Timestamps
//! are stored as microseconds since the Unix epoch so that due queries compare
//! integers.

use super::{ReviewStore, StoreResult};
use crate::models::ReviewState;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use tracing::debug;

const STATE_COLUMNS: &str = "item_id, interval, ease_factor, repetitions, next_review, \
     last_review, total_reviews, correct_streak, difficulty";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a database file and makes sure the tables exist.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening review database");
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database. Nothing survives the connection.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        // Create review_states table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS review_states (
                item_id TEXT PRIMARY KEY,
                interval INTEGER NOT NULL DEFAULT 1,
                ease_factor REAL NOT NULL DEFAULT 2.5,
                repetitions INTEGER NOT NULL DEFAULT 0,
                next_review INTEGER,
                last_review INTEGER,
                total_reviews INTEGER NOT NULL DEFAULT 0,
                correct_streak INTEGER NOT NULL DEFAULT 0,
                difficulty REAL NOT NULL DEFAULT 1.0
            )",
            (),
        )?;

        // Create daily_reviews table, one row per UTC day
        conn.execute(
            "CREATE TABLE IF NOT EXISTS daily_reviews (
                day TEXT PRIMARY KEY,
                review_count INTEGER NOT NULL DEFAULT 0
            )",
            (),
        )?;

        Ok(Self { conn })
    }
}

fn to_micros(instant: Option<DateTime<Utc>>) -> Option<i64> {
    instant.map(|t| t.timestamp_micros())
}

fn from_micros(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<i64>>(idx)? {
        Some(micros) => DateTime::from_timestamp_micros(micros)
            .map(Some)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, micros)),
        None => Ok(None),
    }
}

fn state_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewState> {
    Ok(ReviewState {
        item_id: row.get(0)?,
        interval: row.get(1)?,
        ease_factor: row.get(2)?,
        repetitions: row.get(3)?,
        next_review: from_micros(row, 4)?,
        last_review: from_micros(row, 5)?,
        total_reviews: row.get(6)?,
        correct_streak: row.get(7)?,
        difficulty: row.get(8)?,
    })
}

impl ReviewStore for SqliteStore {
    /// Loads the stored row, or a fresh default state if the item was never reviewed.
    fn get(&self, item_id: &str) -> StoreResult<ReviewState> {
        let stored = self
            .conn
            .query_row(
                &format!("SELECT {STATE_COLUMNS} FROM review_states WHERE item_id = ?1"),
                params![item_id],
                state_from_row,
            )
            .optional()?;

        // Unknown items start from the defaults
        Ok(stored.unwrap_or_else(|| ReviewState::new(item_id)))
    }

    /// Inserts the state or replaces the existing row for its item id.
    fn put(&mut self, state: &ReviewState) -> StoreResult<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO review_states ({STATE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                state.item_id,
                state.interval,
                state.ease_factor,
                state.repetitions,
                to_micros(state.next_review),
                to_micros(state.last_review),
                state.total_reviews,
                state.correct_streak,
                state.difficulty,
            ],
        )?;
        Ok(())
    }

    /// Removes the row. Deleting an unknown id is not an error.
    fn delete(&mut self, item_id: &str) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM review_states WHERE item_id = ?1",
            params![item_id],
        )?;
        Ok(())
    }

    /// Ids due at `as_of`. Never scheduled rows count as due.
    fn due_set(&self, as_of: DateTime<Utc>) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT item_id FROM review_states
             WHERE next_review IS NULL OR next_review <= ?1
             ORDER BY item_id ASC",
        )?;

        let due = stmt
            .query_map(params![as_of.timestamp_micros()], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(due)
    }

    /// Every stored row, ordered by item id.
    fn all(&self) -> StoreResult<Vec<ReviewState>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {STATE_COLUMNS} FROM review_states ORDER BY item_id ASC"
        ))?;

        let states = stmt
            .query_map([], state_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(states)
    }

    /// Increments the counter for `day`, creating the row on first use.
    fn record_review(&mut self, day: NaiveDate) -> StoreResult<()> {
        // Upsert the day counter
        self.conn.execute(
            "INSERT INTO daily_reviews (day, review_count) VALUES (?1, 1)
             ON CONFLICT(day) DO UPDATE SET review_count = review_count + 1",
            params![day],
        )?;
        Ok(())
    }

    /// Reviews counted on `day`. Days without a row count as zero.
    fn reviews_on(&self, day: NaiveDate) -> StoreResult<u32> {
        let count = self
            .conn
            .query_row(
                "SELECT review_count FROM daily_reviews WHERE day = ?1",
                params![day],
                |row| row.get(0),
            )
            .optional()?;

        Ok(count.unwrap_or(0))
    }

    /// Deletes counter rows older than `day`.
    fn prune_daily_before(&mut self, day: NaiveDate) -> StoreResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM daily_reviews WHERE day < ?1", params![day])?;
        Ok(removed)
    }
}
