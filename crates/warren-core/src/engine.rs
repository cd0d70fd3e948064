//! The [`Engine`] handle and the shared transaction helpers.
//!
//! Each operation module (`habits`, `pets`, `groups`, ...) adds methods to
//! [`Engine`]; this module owns construction and the currency helpers
//! every paid or rewarding operation goes through. The helpers mutate the
//! wallet, write the balances back, and append the audit entry -- always
//! inside the caller's transaction, so a later failure rolls all of it
//! back.

use std::sync::Arc;

use sqlx::PgConnection;
use uuid::Uuid;

use warren_db::{EntryStore, PostgresPool, UserStore};
use warren_ledger::{EntryBuilder, Wallet};
use warren_types::{Currency, EntryDirection, User, UserId};

use crate::clock::{Clock, SystemClock};
use crate::error::EngineError;

/// The engine: one handle per process, cheap to clone.
#[derive(Clone)]
pub struct Engine {
    pool: PostgresPool,
    clock: Arc<dyn Clock>,
}

impl Engine {
    /// Create an engine from a pool and an explicit clock.
    pub fn new(pool: PostgresPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Create an engine on the system clock.
    pub fn with_system_clock(pool: PostgresPool) -> Self {
        Self::new(pool, Arc::new(SystemClock))
    }

    /// The engine's pool.
    pub(crate) const fn pool(&self) -> &PostgresPool {
        &self.pool
    }

    /// The engine's clock.
    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Load a user row or fail with `NotFound`.
    pub(crate) async fn require_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<User, EngineError> {
        UserStore::fetch(conn, user_id)
            .await?
            .ok_or_else(|| EngineError::NotFound("User not found.".to_owned()))
    }

    /// Credit `amount` of `currency` to `user`, writing the balance and
    /// the audit entry inside the caller's transaction.
    ///
    /// Returns the updated wallet.
    pub(crate) async fn credit(
        &self,
        conn: &mut PgConnection,
        user: &User,
        currency: Currency,
        amount: i64,
        reason: &str,
        reference_id: Option<Uuid>,
    ) -> Result<Wallet, EngineError> {
        let mut wallet = Wallet::new(user.gold, user.gems);
        // Zero-amount grants (free items) touch neither balance nor ledger.
        if amount == 0 {
            return Ok(wallet);
        }
        wallet.credit(currency, amount)?;
        UserStore::update_balances(conn, user.id, wallet.gold, wallet.gems).await?;

        let mut builder =
            EntryBuilder::new(user.id, currency, EntryDirection::Credit)
                .amount(amount)
                .reason(reason.to_owned());
        if let Some(id) = reference_id {
            builder = builder.reference_id(id);
        }
        let entry = builder.build(self.clock.now())?;
        EntryStore::insert(conn, &entry).await?;

        tracing::debug!(user = %user.id, ?currency, amount, reason, "Credited balance");
        Ok(wallet)
    }

    /// Debit `amount` of `currency` from `user`, writing the balance and
    /// the audit entry inside the caller's transaction.
    ///
    /// The balance check happens in the wallet against the row read by
    /// this transaction; an overdraw surfaces as a Conflict and nothing
    /// is written.
    ///
    /// Returns the updated wallet.
    pub(crate) async fn debit(
        &self,
        conn: &mut PgConnection,
        user: &User,
        currency: Currency,
        amount: i64,
        reason: &str,
        reference_id: Option<Uuid>,
    ) -> Result<Wallet, EngineError> {
        let mut wallet = Wallet::new(user.gold, user.gems);
        // Zero-amount charges (free catalog items) are a no-op.
        if amount == 0 {
            return Ok(wallet);
        }
        wallet.debit(currency, amount)?;
        UserStore::update_balances(conn, user.id, wallet.gold, wallet.gems).await?;

        let mut builder =
            EntryBuilder::new(user.id, currency, EntryDirection::Debit)
                .amount(amount)
                .reason(reason.to_owned());
        if let Some(id) = reference_id {
            builder = builder.reference_id(id);
        }
        let entry = builder.build(self.clock.now())?;
        EntryStore::insert(conn, &entry).await?;

        tracing::debug!(user = %user.id, ?currency, amount, reason, "Debited balance");
        Ok(wallet)
    }
}
