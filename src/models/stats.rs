//! Progress statistics aggregated over every stored review state.
use super::ReviewState;
use super::review_state::DEFAULT_EASE_FACTOR;
use super::sm2::MIN_EASE_FACTOR;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_items: usize,
    pub due_items: usize,
    pub reviewed_today: u32,
    pub average_accuracy: f64,
    /// Best streak currently held by any single item, not a learner-wide
    /// running streak. Always equal to `longest_streak`.
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl ReviewStats {
    pub fn compute(states: &[ReviewState], due_items: usize, reviewed_today: u32) -> Self {
        let accuracies: Vec<f64> = states
            .iter()
            .filter(|state| state.is_reviewed())
            .map(estimated_accuracy)
            .collect();

        let average_accuracy = if accuracies.is_empty() {
            0.0
        } else {
            accuracies.iter().sum::<f64>() / accuracies.len() as f64
        };

        let best_streak = states
            .iter()
            .map(|state| state.correct_streak)
            .max()
            .unwrap_or(0);

        Self {
            total_items: states.len(),
            due_items,
            reviewed_today,
            average_accuracy,
            current_streak: best_streak,
            longest_streak: best_streak,
        }
    }
}

/// Maps the ease factor range [1.3, 2.5] onto 0-100%.
pub fn estimated_accuracy(state: &ReviewState) -> f64 {
    let span = DEFAULT_EASE_FACTOR - MIN_EASE_FACTOR;
    ((state.ease_factor - MIN_EASE_FACTOR) / span * 100.0).clamp(0.0, 100.0)
}
