//! Streak computation and nightly expiry decisions.
//!
//! A streak counts consecutive UTC calendar days with a habit log. The day
//! grid is derived from explicit dates passed in by the caller -- nothing
//! here reads the system clock.
//!
//! Two rules, both calendar-day based (not 24-hour windows):
//!
//! - On a new log: the streak extends iff the most recent prior log was
//!   exactly yesterday; otherwise it restarts at 1.
//! - Nightly: a positive streak expires iff the most recent log is absent
//!   or strictly before yesterday. A habit last logged yesterday survives
//!   (today's log has simply not happened yet).

use chrono::NaiveDate;

use crate::error::TaskError;

/// Compute the streak value a new log should produce.
///
/// `last_log_day` is the UTC calendar day of the most recent prior log,
/// if any. The caller has already rejected a same-day duplicate.
///
/// # Errors
///
/// Returns [`TaskError::CounterOverflow`] if the streak counter would
/// overflow `i32` (a streak of two billion days is a data bug, not a
/// milestone).
pub fn next_streak(
    current_streak: i32,
    last_log_day: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<i32, TaskError> {
    let extends = last_log_day.is_some_and(|day| Some(day) == today.pred_opt());
    if extends {
        current_streak
            .checked_add(1)
            .ok_or(TaskError::CounterOverflow {
                context: "streak increment",
            })
    } else {
        Ok(1)
    }
}

/// Decide whether a habit's streak has expired as of `today`.
///
/// Used by the nightly maintenance job. Paused habits and habits with no
/// streak are never reset; for the rest, the streak expires when the most
/// recent log is absent or strictly before yesterday.
pub fn streak_expired(
    is_paused: bool,
    current_streak: i32,
    last_log_day: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    if is_paused || current_streak <= 0 {
        return false;
    }
    match (last_log_day, today.pred_opt()) {
        (Some(day), Some(yesterday)) => day < yesterday,
        // No log at all: a positive streak is stale by definition.
        (None, _) => true,
        // `today` has no predecessor only at the calendar epoch.
        (Some(_), None) => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn log_after_yesterday_extends_streak() {
        let today = day(2026, 3, 10);
        let streak = next_streak(5, Some(day(2026, 3, 9)), today).unwrap();
        assert_eq!(streak, 6);
    }

    #[test]
    fn first_log_starts_streak_at_one() {
        let today = day(2026, 3, 10);
        assert_eq!(next_streak(0, None, today).unwrap(), 1);
    }

    #[test]
    fn gap_restarts_streak_at_one() {
        let today = day(2026, 3, 10);
        assert_eq!(next_streak(5, Some(day(2026, 3, 8)), today).unwrap(), 1);
        assert_eq!(next_streak(12, Some(day(2026, 2, 1)), today).unwrap(), 1);
    }

    #[test]
    fn streak_extends_across_month_boundary() {
        let today = day(2026, 4, 1);
        assert_eq!(next_streak(3, Some(day(2026, 3, 31)), today).unwrap(), 4);
    }

    #[test]
    fn streak_overflow_is_an_error() {
        let today = day(2026, 3, 10);
        let result = next_streak(i32::MAX, Some(day(2026, 3, 9)), today);
        assert!(matches!(result, Err(TaskError::CounterOverflow { .. })));
    }

    #[test]
    fn streak_expires_after_two_day_gap() {
        let today = day(2026, 3, 10);
        assert!(streak_expired(false, 5, Some(day(2026, 3, 8)), today));
    }

    #[test]
    fn streak_survives_when_last_log_was_yesterday() {
        let today = day(2026, 3, 10);
        assert!(!streak_expired(false, 5, Some(day(2026, 3, 9)), today));
    }

    #[test]
    fn streak_survives_when_already_logged_today() {
        let today = day(2026, 3, 10);
        assert!(!streak_expired(false, 5, Some(today), today));
    }

    #[test]
    fn paused_habits_are_never_reset() {
        let today = day(2026, 3, 10);
        assert!(!streak_expired(true, 5, Some(day(2026, 1, 1)), today));
    }

    #[test]
    fn zero_streak_needs_no_reset() {
        let today = day(2026, 3, 10);
        assert!(!streak_expired(false, 0, None, today));
    }

    #[test]
    fn positive_streak_with_no_logs_expires() {
        let today = day(2026, 3, 10);
        assert!(streak_expired(false, 3, None, today));
    }
}
