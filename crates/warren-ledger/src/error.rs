//! Error types for the ledger crate.
//!
//! All operations that can fail return typed errors rather than panicking.

use warren_types::Currency;

/// Errors that can occur during wallet and ledger-entry operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A debit would overdraw the balance.
    #[error("insufficient {currency:?}: need {required} but only have {available}")]
    InsufficientFunds {
        /// The currency being spent.
        currency: Currency,
        /// The amount the operation needs.
        required: i64,
        /// The balance actually available.
        available: i64,
    },

    /// A credit would overflow the balance counter.
    #[error("balance overflow crediting {amount} {currency:?}")]
    BalanceOverflow {
        /// The currency being credited.
        currency: Currency,
        /// The amount that overflowed.
        amount: i64,
    },

    /// An entry or operation amount was zero or negative.
    #[error("amount must be strictly positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount.
        amount: i64,
    },

    /// A required builder field was not set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An entry reason was empty.
    #[error("entry reason must not be empty")]
    EmptyReason,
}
