//! The injected time source for the engine.
//!
//! Calendar-day comparisons (streaks, same-day guards, nightly expiry)
//! make "now" load-bearing state. The engine therefore never reads the
//! system clock directly: it asks a [`Clock`], so production uses
//! [`SystemClock`] and tests pin time with [`FixedClock`] to walk
//! scenarios across day boundaries deterministically.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// The current UTC calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to an explicit instant, settable at runtime.
///
/// Used by tests and seed tooling to replay multi-day scenarios.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock pinned to `instant`.
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        if let Ok(mut guard) = self.instant.lock() {
            *guard = instant;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
            .lock()
            .map_or_else(|poisoned| *poisoned.into_inner(), |guard| *guard)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn fixed_clock_stays_put_until_set() {
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.today(), start.date_naive());

        let next_day = Utc.with_ymd_and_hms(2026, 3, 11, 0, 30, 0).unwrap();
        clock.set(next_day);
        assert_eq!(clock.now(), next_day);
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2026, 3, 11).unwrap()
        );
    }
}
