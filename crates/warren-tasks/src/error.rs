//! Error types for the task progression crate.
//!
//! Each variant maps onto the engine's error taxonomy: duplicate or
//! out-of-order completions are conflicts, disallowed tier changes are bad
//! requests. The mapping itself happens in `warren-core`.

use warren_types::Difficulty;

/// Errors that can occur while planning task state transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The habit is paused and cannot be logged.
    #[error("cannot log a paused habit")]
    HabitPaused,

    /// A log already exists for this habit on the current calendar day.
    #[error("this habit has already been logged today")]
    AlreadyLoggedToday,

    /// The daily was already completed on the current calendar day.
    #[error("this daily has already been completed today")]
    AlreadyCompletedToday,

    /// The to-do's completed flag is terminal.
    #[error("this to-do is already completed")]
    AlreadyCompleted,

    /// A difficulty change must actually change the tier.
    #[error("the new difficulty cannot be the same as the old one")]
    SameDifficulty,

    /// The requested tier pair has no entry in the downgrade cost table.
    #[error("changing difficulty from {from:?} to {to:?} is not allowed")]
    UnsupportedDifficultyChange {
        /// Current tier.
        from: Difficulty,
        /// Requested tier.
        to: Difficulty,
    },

    /// Free deletion requires a streak the habit has not reached.
    #[error(
        "a streak of {required} is needed to delete this habit for free \
         (current streak: {current}); use the paid deletion instead"
    )]
    StreakTooShortForFreeDeletion {
        /// The per-difficulty streak threshold.
        required: i32,
        /// The habit's current streak.
        current: i32,
    },

    /// A counter would overflow.
    #[error("counter overflow: {context}")]
    CounterOverflow {
        /// Description of what was being counted.
        context: &'static str,
    },
}
