//! Currency wallet and append-only audit ledger for the Warren tracker.
//!
//! Two pieces live here:
//!
//! - [`Wallet`] -- the in-memory view of a user's gold/gem balances with
//!   checked credit/debit operations. Balances never go negative: a debit
//!   that would overdraw fails with [`LedgerError::InsufficientFunds`]
//!   carrying the required and available amounts.
//! - [`EntryBuilder`] -- validated construction of [`CurrencyEntry`] audit
//!   records. Every balance mutation in the engine appends exactly one
//!   entry in the same transaction, so balances are reconstructable.
//!
//! [`CurrencyEntry`]: warren_types::CurrencyEntry

pub mod entry;
pub mod error;
pub mod wallet;

pub use entry::EntryBuilder;
pub use error::LedgerError;
pub use wallet::Wallet;
