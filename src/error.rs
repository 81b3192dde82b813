//! Errors raised while submitting or querying reviews.

use crate::database::StoreError;
use thiserror::Error;

pub type ReviewResult<T> = Result<T, ReviewError>;

#[derive(Error, Debug)]
pub enum ReviewError {
    /// Grade outside 0-5. Raised before the store is touched.
    #[error("Grade must be between 0 and 5, got {0}")]
    InvalidGrade(i64),

    #[error("Malformed review submission: {0}")]
    MalformedInput(String),

    /// A stored or imported state that breaks the scheduler's bounds.
    #[error("Invalid review state for '{item_id}': {reason}")]
    InvalidState { item_id: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
