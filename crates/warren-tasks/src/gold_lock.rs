//! The time-gated gold-reward lock.
//!
//! Upgrading a task to a harder tier is free but suppresses gold rewards
//! for a fixed window, so tier changes cannot be farmed for quick gold.
//! The same gate applies to habits and dailies; happiness grants are never
//! gated.

use chrono::{DateTime, Days, Utc};

/// Length of the reward lock imposed by a difficulty upgrade, in days.
pub const LOCK_DAYS: u64 = 7;

/// Whether gold rewards are currently suppressed.
///
/// A lock timestamp in the past (or absent) does not suppress anything;
/// expired locks are left in place and simply stop mattering.
pub fn is_locked(locked_until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    locked_until.is_some_and(|until| now < until)
}

/// The lock timestamp a difficulty upgrade at `now` imposes.
///
/// Saturates at the end of representable time rather than overflowing --
/// a lock that far out is indistinguishable from permanent.
pub fn upgrade_lock(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_days(Days::new(LOCK_DAYS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, 0, 0).unwrap()
    }

    #[test]
    fn no_lock_means_unlocked() {
        assert!(!is_locked(None, at(12)));
    }

    #[test]
    fn future_lock_suppresses_gold() {
        let lock = upgrade_lock(at(12));
        assert!(is_locked(Some(lock), at(13)));
    }

    #[test]
    fn expired_lock_is_inert() {
        let past = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert!(!is_locked(Some(past), at(12)));
    }

    #[test]
    fn lock_boundary_is_exclusive() {
        let lock = at(12);
        // At the exact expiry instant the lock no longer applies.
        assert!(!is_locked(Some(lock), at(12)));
    }

    #[test]
    fn upgrade_lock_is_seven_days_out() {
        let now = at(12);
        let lock = upgrade_lock(now);
        assert_eq!(lock, Utc.with_ymd_and_hms(2026, 3, 17, 12, 0, 0).unwrap());
    }
}
