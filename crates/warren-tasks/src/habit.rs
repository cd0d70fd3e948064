//! Habit state transitions: logging, paid difficulty changes, deletion.
//!
//! Every function here is a pure planner: it reads the habit and an
//! explicit "now", checks the preconditions, and returns the full set of
//! mutations for the engine to apply inside one transaction. Nothing is
//! written here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use warren_types::{Difficulty, Habit};

use crate::difficulty::{
    deletion_fee, downgrade_cost, free_deletion_streak, reward_points, HAPPINESS_PER_COMPLETION,
};
use crate::error::TaskError;
use crate::gold_lock::{is_locked, upgrade_lock};
use crate::streak::next_streak;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// The planned effect of one habit log.
///
/// `gold` is the actual grant after the reward lock is applied -- zero for
/// negative logs and for locked habits. `happiness` is granted for any
/// completed log regardless of lock state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLogPlan {
    /// Gold to credit the user.
    pub gold: i64,
    /// Happiness to grant the pet.
    pub happiness: i32,
    /// The streak value after this log.
    pub new_streak: i32,
    /// The longest-streak high-water mark after this log.
    pub new_longest_streak: i32,
    /// Positive counter after this log.
    pub new_positive_counter: i64,
    /// Negative counter after this log.
    pub new_negative_counter: i64,
}

/// Plan the effect of logging `habit` at `now`.
///
/// `last_log_day` is the UTC calendar day of the habit's most recent log,
/// if any.
///
/// # Errors
///
/// Returns [`TaskError::HabitPaused`] for paused habits and
/// [`TaskError::AlreadyLoggedToday`] when the most recent log falls on
/// today's calendar day. Counter overflow surfaces as
/// [`TaskError::CounterOverflow`].
pub fn plan_log(
    habit: &Habit,
    completed: bool,
    last_log_day: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Result<HabitLogPlan, TaskError> {
    if habit.is_paused {
        return Err(TaskError::HabitPaused);
    }

    let today = now.date_naive();
    if last_log_day == Some(today) {
        return Err(TaskError::AlreadyLoggedToday);
    }

    let new_streak = next_streak(habit.current_streak, last_log_day, today)?;
    let new_longest_streak = habit.longest_streak.max(new_streak);

    let (gold, happiness) = if completed {
        let gold = if is_locked(habit.gold_reward_locked_until, now) {
            0
        } else {
            reward_points(habit.difficulty)
        };
        (gold, HAPPINESS_PER_COMPLETION)
    } else {
        (0, 0)
    };

    let new_positive_counter = habit
        .positive_counter
        .checked_add(i64::from(completed))
        .ok_or(TaskError::CounterOverflow {
            context: "positive counter",
        })?;
    let new_negative_counter = habit
        .negative_counter
        .checked_add(i64::from(!completed))
        .ok_or(TaskError::CounterOverflow {
            context: "negative counter",
        })?;

    Ok(HabitLogPlan {
        gold,
        happiness,
        new_streak,
        new_longest_streak,
        new_positive_counter,
        new_negative_counter,
    })
}

// ---------------------------------------------------------------------------
// Paid difficulty change
// ---------------------------------------------------------------------------

/// The planned effect of a difficulty change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyChange {
    /// Moving to a harder tier: free, but gold rewards are suppressed
    /// until the given timestamp.
    Upgrade {
        /// The new reward-lock expiry.
        locked_until: DateTime<Utc>,
    },
    /// Moving to an easier tier: costs gold and clears any existing lock.
    Downgrade {
        /// Gold to debit the user.
        cost: i64,
    },
}

/// Plan a difficulty change from the habit's current tier to `new`.
///
/// # Errors
///
/// Returns [`TaskError::SameDifficulty`] when the tier does not change and
/// [`TaskError::UnsupportedDifficultyChange`] when the pair has no entry
/// in the downgrade table.
pub fn plan_difficulty_change(
    current: Difficulty,
    new: Difficulty,
    now: DateTime<Utc>,
) -> Result<DifficultyChange, TaskError> {
    if current == new {
        return Err(TaskError::SameDifficulty);
    }

    if new.rank() > current.rank() {
        return Ok(DifficultyChange::Upgrade {
            locked_until: upgrade_lock(now),
        });
    }

    downgrade_cost(current, new)
        .map(|cost| DifficultyChange::Downgrade { cost })
        .ok_or(TaskError::UnsupportedDifficultyChange {
            from: current,
            to: new,
        })
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// How a habit may be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionTerms {
    /// The streak threshold was reached; deletion is free.
    Free,
    /// Below the threshold; deletion costs the per-tier fee.
    Paid {
        /// Gold to debit the user.
        fee: i64,
    },
}

/// The deletion terms for `habit` given its difficulty and streak.
pub const fn deletion_terms(habit: &Habit) -> DeletionTerms {
    if habit.current_streak >= free_deletion_streak(habit.difficulty) {
        DeletionTerms::Free
    } else {
        DeletionTerms::Paid {
            fee: deletion_fee(habit.difficulty),
        }
    }
}

/// Check that free deletion is available, for the unpaid removal path.
///
/// # Errors
///
/// Returns [`TaskError::StreakTooShortForFreeDeletion`] with the required
/// and current streak values when the threshold has not been reached.
pub const fn ensure_free_deletion(habit: &Habit) -> Result<(), TaskError> {
    let required = free_deletion_streak(habit.difficulty);
    if habit.current_streak >= required {
        Ok(())
    } else {
        Err(TaskError::StreakTooShortForFreeDeletion {
            required,
            current: habit.current_streak,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use warren_types::{HabitId, HabitKind, UserId};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn habit(difficulty: Difficulty) -> Habit {
        Habit {
            id: HabitId::new(),
            user_id: UserId::new(),
            title: "Exercise".to_owned(),
            notes: None,
            kind: HabitKind::Positive,
            difficulty,
            is_paused: false,
            positive_counter: 4,
            negative_counter: 1,
            current_streak: 5,
            longest_streak: 8,
            gold_reward_locked_until: None,
            created_at: noon(2026, 1, 1),
        }
    }

    #[test]
    fn completed_log_grants_gold_and_happiness() {
        let h = habit(Difficulty::Medium);
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let plan = plan_log(&h, true, Some(yesterday), noon(2026, 3, 10)).unwrap();
        assert_eq!(plan.gold, 10);
        assert_eq!(plan.happiness, 5);
        assert_eq!(plan.new_streak, 6);
        assert_eq!(plan.new_longest_streak, 8);
        assert_eq!(plan.new_positive_counter, 5);
        assert_eq!(plan.new_negative_counter, 1);
    }

    #[test]
    fn negative_log_grants_nothing_but_still_advances_streak() {
        let h = habit(Difficulty::Hard);
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let plan = plan_log(&h, false, Some(yesterday), noon(2026, 3, 10)).unwrap();
        assert_eq!(plan.gold, 0);
        assert_eq!(plan.happiness, 0);
        assert_eq!(plan.new_streak, 6);
        assert_eq!(plan.new_negative_counter, 2);
        assert_eq!(plan.new_positive_counter, 4);
    }

    #[test]
    fn longest_streak_is_raised_when_surpassed() {
        let mut h = habit(Difficulty::Easy);
        h.current_streak = 8;
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let plan = plan_log(&h, true, Some(yesterday), noon(2026, 3, 10)).unwrap();
        assert_eq!(plan.new_streak, 9);
        assert_eq!(plan.new_longest_streak, 9);
    }

    #[test]
    fn gap_restarts_streak() {
        let h = habit(Difficulty::Easy);
        let two_days_ago = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let plan = plan_log(&h, true, Some(two_days_ago), noon(2026, 3, 10)).unwrap();
        assert_eq!(plan.new_streak, 1);
        assert_eq!(plan.new_longest_streak, 8);
    }

    #[test]
    fn paused_habit_rejected() {
        let mut h = habit(Difficulty::Easy);
        h.is_paused = true;
        let result = plan_log(&h, true, None, noon(2026, 3, 10));
        assert_eq!(result, Err(TaskError::HabitPaused));
    }

    #[test]
    fn same_day_duplicate_rejected() {
        let h = habit(Difficulty::Easy);
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let result = plan_log(&h, true, Some(today), noon(2026, 3, 10));
        assert_eq!(result, Err(TaskError::AlreadyLoggedToday));
    }

    #[test]
    fn locked_habit_grants_no_gold_but_keeps_happiness() {
        let mut h = habit(Difficulty::Hard);
        h.gold_reward_locked_until = Some(noon(2026, 3, 15));
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let plan = plan_log(&h, true, Some(yesterday), noon(2026, 3, 10)).unwrap();
        assert_eq!(plan.gold, 0);
        assert_eq!(plan.happiness, 5);
    }

    #[test]
    fn expired_lock_grants_gold_again() {
        let mut h = habit(Difficulty::Hard);
        h.gold_reward_locked_until = Some(noon(2026, 3, 5));
        let plan = plan_log(&h, true, None, noon(2026, 3, 10)).unwrap();
        assert_eq!(plan.gold, 20);
    }

    #[test]
    fn upgrade_is_free_with_seven_day_lock() {
        let now = noon(2026, 3, 10);
        let change = plan_difficulty_change(Difficulty::Easy, Difficulty::Hard, now).unwrap();
        assert_eq!(
            change,
            DifficultyChange::Upgrade {
                locked_until: noon(2026, 3, 17),
            }
        );
    }

    #[test]
    fn downgrade_charges_the_pair_cost() {
        let now = noon(2026, 3, 10);
        let change = plan_difficulty_change(Difficulty::Hard, Difficulty::Easy, now).unwrap();
        assert_eq!(change, DifficultyChange::Downgrade { cost: 200 });
    }

    #[test]
    fn same_tier_change_rejected() {
        let now = noon(2026, 3, 10);
        let result = plan_difficulty_change(Difficulty::Medium, Difficulty::Medium, now);
        assert_eq!(result, Err(TaskError::SameDifficulty));
    }

    #[test]
    fn deletion_is_free_at_the_streak_threshold() {
        let mut h = habit(Difficulty::Medium);
        h.current_streak = 20;
        assert_eq!(deletion_terms(&h), DeletionTerms::Free);
        assert!(ensure_free_deletion(&h).is_ok());
    }

    #[test]
    fn deletion_below_threshold_is_paid() {
        let mut h = habit(Difficulty::Hard);
        h.current_streak = 29;
        assert_eq!(deletion_terms(&h), DeletionTerms::Paid { fee: 300 });
        assert_eq!(
            ensure_free_deletion(&h),
            Err(TaskError::StreakTooShortForFreeDeletion {
                required: 30,
                current: 29,
            })
        );
    }
}
