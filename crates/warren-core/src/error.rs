//! The engine's error taxonomy.
//!
//! Four caller-visible kinds plus an internal catch-all:
//!
//! - **`NotFound`** -- the entity is absent or not visible to the caller
//! - **Forbidden** -- the caller lacks ownership or role for the action
//! - **Conflict** -- a business rule rejects the current state
//!   (insufficient funds, same-day duplicate, already completed,
//!   duplicate name)
//! - **`BadRequest`** -- the operation is structurally invalid (equipping a
//!   non-equippable item, a tier change outside the table)
//! - **Internal** -- storage failures and invariant breaches, distinct
//!   from the four business kinds and never retried here
//!
//! Errors from the rule crates convert into the taxonomy via the `From`
//! impls below; the request layer only ever sees [`EngineError`].

use warren_db::StoreError;
use warren_ledger::LedgerError;
use warren_pet::PetError;
use warren_social::SocialError;
use warren_tasks::TaskError;

/// The caller-visible category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Entity absent or invisible to the caller.
    NotFound,
    /// Ownership or role check failed.
    Forbidden,
    /// Business rule rejected the current state.
    Conflict,
    /// Structurally invalid operation.
    BadRequest,
    /// Storage failure or invariant breach.
    Internal,
}

/// An error surfaced by an engine operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Entity absent or invisible to the caller.
    #[error("{0}")]
    NotFound(String),

    /// Ownership or role check failed.
    #[error("{0}")]
    Forbidden(String),

    /// Business rule rejected the current state.
    #[error("{0}")]
    Conflict(String),

    /// Structurally invalid operation.
    #[error("{0}")]
    BadRequest(String),

    /// The data layer failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// An internal invariant was breached.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// The caller-visible category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Store(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(StoreError::from(err))
    }
}

impl From<TaskError> for EngineError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::HabitPaused
            | TaskError::AlreadyLoggedToday
            | TaskError::AlreadyCompletedToday
            | TaskError::AlreadyCompleted
            | TaskError::SameDifficulty => Self::Conflict(err.to_string()),
            TaskError::UnsupportedDifficultyChange { .. } => Self::BadRequest(err.to_string()),
            TaskError::StreakTooShortForFreeDeletion { .. } => Self::Forbidden(err.to_string()),
            TaskError::CounterOverflow { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<LedgerError> for EngineError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { .. } => Self::Conflict(err.to_string()),
            LedgerError::BalanceOverflow { .. }
            | LedgerError::NonPositiveAmount { .. }
            | LedgerError::MissingField(_)
            | LedgerError::EmptyReason => Self::Internal(err.to_string()),
        }
    }
}

impl From<PetError> for EngineError {
    fn from(err: PetError) -> Self {
        match err {
            PetError::NotConsumable { .. } | PetError::NotEquippable { .. } => {
                Self::BadRequest(err.to_string())
            }
            PetError::InvalidQuantity { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<SocialError> for EngineError {
    fn from(err: SocialError) -> Self {
        match err {
            SocialError::InsufficientRole { .. } | SocialError::OwnerRoleImmutable => {
                Self::Forbidden(err.to_string())
            }
            SocialError::NotPending { .. } | SocialError::OwnerCannotLeave => {
                Self::Conflict(err.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use warren_types::{Currency, MembershipRole, MembershipStatus};

    #[test]
    fn insufficient_funds_is_a_conflict() {
        let err = EngineError::from(LedgerError::InsufficientFunds {
            currency: Currency::Gold,
            required: 150,
            available: 100,
        });
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("150"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn same_day_duplicate_is_a_conflict() {
        let err = EngineError::from(TaskError::AlreadyLoggedToday);
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn disallowed_tier_change_is_a_bad_request() {
        let err = EngineError::from(TaskError::UnsupportedDifficultyChange {
            from: warren_types::Difficulty::Easy,
            to: warren_types::Difficulty::Easy,
        });
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn short_streak_free_deletion_is_forbidden() {
        let err = EngineError::from(TaskError::StreakTooShortForFreeDeletion {
            required: 30,
            current: 3,
        });
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn role_breaches_are_forbidden_and_state_breaches_conflict() {
        let role = EngineError::from(SocialError::InsufficientRole {
            actor: MembershipRole::Admin,
            target: MembershipRole::Admin,
        });
        assert_eq!(role.kind(), ErrorKind::Forbidden);

        let state = EngineError::from(SocialError::NotPending {
            status: MembershipStatus::Active,
        });
        assert_eq!(state.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn pet_shape_errors_are_bad_requests() {
        let err = EngineError::from(PetError::NotEquippable {
            kind: warren_types::PetItemKind::Food,
        });
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
