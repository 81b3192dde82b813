//! Source of "now" for review submissions.
//!
//! The scheduler never reads the wall clock itself; callers capture one
//! instant per submission from a [`Clock`] and pass it down.

use chrono::{DateTime, Days, Utc};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used to simulate the passing of days.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    /// Moves the clock forward by whole calendar days.
    pub fn advance_days(&self, days: u64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = current
            .checked_add_days(Days::new(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances_by_days() {
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 18, 45, 0).unwrap();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);
        clock.advance_days(1);
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2024, 2, 1, 18, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let later = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
