//! Reward and cost tables keyed by difficulty tier.
//!
//! All gamified pricing lives here as `const fn` lookup tables over the
//! closed [`Difficulty`] enum:
//!
//! - gold granted per habit/daily completion
//! - gold granted per to-do completion (one tier is half the next)
//! - gold cost of moving a habit to an easier tier
//! - the free-deletion streak threshold and the paid-deletion fee
//!
//! All values are integral gold. No floating point anywhere.

use warren_types::Difficulty;

/// Gold granted for a completed habit log or daily completion.
pub const fn reward_points(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Trivial => 2,
        Difficulty::Easy => 5,
        Difficulty::Medium => 10,
        Difficulty::Hard => 20,
    }
}

/// Gold granted for completing a to-do.
///
/// To-dos reward below habits at every tier; each tier is half the next.
pub const fn todo_reward_points(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Trivial => 2,
        Difficulty::Easy => 4,
        Difficulty::Medium => 8,
        Difficulty::Hard => 16,
    }
}

/// Happiness granted to the pet alongside any rewarding completion.
pub const HAPPINESS_PER_COMPLETION: i32 = 5;

/// Gold cost of moving a habit from `from` to the easier tier `to`.
///
/// Returns `None` when the pair is not a downgrade or has no entry --
/// callers treat that as a disallowed change. Abandoning a hard habit is
/// priced steeper the further down it goes.
pub const fn downgrade_cost(from: Difficulty, to: Difficulty) -> Option<i64> {
    match (from, to) {
        (Difficulty::Hard, Difficulty::Medium) => Some(150),
        (Difficulty::Hard, Difficulty::Easy) => Some(200),
        (Difficulty::Hard, Difficulty::Trivial) => Some(250),
        (Difficulty::Medium, Difficulty::Easy) => Some(100),
        (Difficulty::Medium, Difficulty::Trivial) => Some(50),
        (Difficulty::Easy, Difficulty::Trivial) => Some(20),
        _ => None,
    }
}

/// Streak length at which a habit may be deleted for free.
pub const fn free_deletion_streak(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Trivial => 5,
        Difficulty::Easy => 10,
        Difficulty::Medium => 20,
        Difficulty::Hard => 30,
    }
}

/// Flat gold fee for deleting a habit below its free-deletion streak.
pub const fn deletion_fee(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Trivial => 25,
        Difficulty::Easy => 50,
        Difficulty::Medium => 100,
        Difficulty::Hard => 300,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Difficulty; 4] = [
        Difficulty::Trivial,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    #[test]
    fn reward_points_match_tier_table() {
        assert_eq!(reward_points(Difficulty::Trivial), 2);
        assert_eq!(reward_points(Difficulty::Easy), 5);
        assert_eq!(reward_points(Difficulty::Medium), 10);
        assert_eq!(reward_points(Difficulty::Hard), 20);
    }

    #[test]
    fn todo_rewards_stay_below_habit_rewards() {
        for difficulty in ALL {
            assert!(todo_reward_points(difficulty) <= reward_points(difficulty));
        }
        assert_eq!(todo_reward_points(Difficulty::Hard), 16);
    }

    #[test]
    fn downgrade_table_covers_exactly_the_easier_pairs() {
        for from in ALL {
            for to in ALL {
                let cost = downgrade_cost(from, to);
                if to.rank() < from.rank() {
                    assert!(cost.is_some(), "missing cost for {from:?} -> {to:?}");
                } else {
                    assert!(cost.is_none(), "unexpected cost for {from:?} -> {to:?}");
                }
            }
        }
    }

    #[test]
    fn downgrade_costs_grow_with_distance() {
        assert_eq!(downgrade_cost(Difficulty::Hard, Difficulty::Medium), Some(150));
        assert_eq!(downgrade_cost(Difficulty::Hard, Difficulty::Easy), Some(200));
        assert_eq!(downgrade_cost(Difficulty::Hard, Difficulty::Trivial), Some(250));
        assert_eq!(downgrade_cost(Difficulty::Medium, Difficulty::Trivial), Some(50));
        assert_eq!(downgrade_cost(Difficulty::Easy, Difficulty::Trivial), Some(20));
    }

    #[test]
    fn deletion_tables_scale_with_difficulty() {
        assert_eq!(free_deletion_streak(Difficulty::Hard), 30);
        assert_eq!(free_deletion_streak(Difficulty::Trivial), 5);
        assert_eq!(deletion_fee(Difficulty::Hard), 300);
        assert_eq!(deletion_fee(Difficulty::Trivial), 25);
        for pair in ALL.windows(2) {
            if let [lo, hi] = pair {
                assert!(free_deletion_streak(*lo) < free_deletion_streak(*hi));
                assert!(deletion_fee(*lo) < deletion_fee(*hi));
            }
        }
    }
}
