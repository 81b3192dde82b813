//! Recall grade of a single review, 0 (blackout) to 5 (perfect).
use crate::error::ReviewError;
use serde::Serialize;

pub const MAX_GRADE: u8 = 5;
pub const PASSING_GRADE: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    /// Validates a raw grade. Out of range values are rejected, never clamped.
    pub fn new(raw: i64) -> Result<Self, ReviewError> {
        if (0..=MAX_GRADE as i64).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(ReviewError::InvalidGrade(raw))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Grades of 3 and above count as a successful recall.
    pub fn is_pass(self) -> bool {
        self.0 >= PASSING_GRADE
    }

    /// Fixed learner feedback for this grade.
    pub fn feedback_message(self) -> &'static str {
        match self.0 {
            0 => "Don't worry, this word will come up again soon. Keep practicing!",
            1 => "Incorrect, but you're learning. This word will be reviewed again shortly.",
            2 => "Close! This word needs more practice.",
            3 => "Correct! This word will be reviewed again in a few days.",
            4 => "Good job! You're getting comfortable with this word.",
            _ => "Excellent! You know this word well.",
        }
    }
}

impl TryFrom<i64> for Grade {
    type Error = ReviewError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}
