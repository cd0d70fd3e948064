//! Persistence for the append-only currency audit ledger.
//!
//! Entries are only ever inserted, in the same transaction as the balance
//! mutation they describe. There is no update or delete path.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{CurrencyEntry, CurrencyEntryId, UserId};

use crate::codec::{
    currency_from_db, currency_to_db, entry_direction_from_db, entry_direction_to_db,
};
use crate::error::StoreError;

/// Operations on the `currency_entries` table.
pub struct EntryStore;

/// A row from the `currency_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct EntryRow {
    id: Uuid,
    user_id: Uuid,
    currency: String,
    direction: String,
    amount: i64,
    reason: String,
    reference_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl EntryRow {
    fn into_domain(self) -> Result<CurrencyEntry, StoreError> {
        Ok(CurrencyEntry {
            id: CurrencyEntryId::from(self.id),
            user_id: UserId::from(self.user_id),
            currency: currency_from_db(&self.currency)?,
            direction: entry_direction_from_db(&self.direction)?,
            amount: self.amount,
            reason: self.reason,
            reference_id: self.reference_id,
            created_at: self.created_at,
        })
    }
}

impl EntryStore {
    /// Append an audit entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert(conn: &mut PgConnection, entry: &CurrencyEntry) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO currency_entries
                  (id, user_id, currency, direction, amount, reason, reference_id, created_at)
              VALUES ($1, $2, $3::currency, $4::entry_direction, $5, $6, $7, $8)",
        )
        .bind(entry.id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(currency_to_db(entry.currency))
        .bind(entry_direction_to_db(entry.direction))
        .bind(entry.amount)
        .bind(&entry.reason)
        .bind(entry.reference_id)
        .bind(entry.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// List a user's audit entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<CurrencyEntry>, StoreError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"SELECT id, user_id, currency::TEXT as currency,
                     direction::TEXT as direction, amount, reason, reference_id, created_at
                FROM currency_entries WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(EntryRow::into_domain).collect()
    }
}
