//! Persistence for user-defined redeemable rewards.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{Reward, RewardId, UserId};

use crate::error::StoreError;

/// Operations on the `rewards` table.
pub struct RewardStore;

/// A row from the `rewards` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct RewardRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    notes: Option<String>,
    cost: i64,
    last_redeemed: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<RewardRow> for Reward {
    fn from(row: RewardRow) -> Self {
        Self {
            id: RewardId::from(row.id),
            user_id: UserId::from(row.user_id),
            title: row.title,
            notes: row.notes,
            cost: row.cost,
            last_redeemed: row.last_redeemed,
            created_at: row.created_at,
        }
    }
}

const SELECT_REWARD: &str =
    r"SELECT id, user_id, title, notes, cost, last_redeemed, created_at FROM rewards";

impl RewardStore {
    /// Insert a new reward row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert(conn: &mut PgConnection, reward: &Reward) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO rewards (id, user_id, title, notes, cost, last_redeemed, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(reward.id.into_inner())
        .bind(reward.user_id.into_inner())
        .bind(&reward.title)
        .bind(&reward.notes)
        .bind(reward.cost)
        .bind(reward.last_redeemed)
        .bind(reward.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a reward by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn fetch(
        conn: &mut PgConnection,
        id: RewardId,
    ) -> Result<Option<Reward>, StoreError> {
        let row = sqlx::query_as::<_, RewardRow>(&format!("{SELECT_REWARD} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(Reward::from))
    }

    /// List all rewards owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<Reward>, StoreError> {
        let rows = sqlx::query_as::<_, RewardRow>(&format!(
            "{SELECT_REWARD} WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(Reward::from).collect())
    }

    /// Update a reward's editable metadata.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn update_meta(
        conn: &mut PgConnection,
        id: RewardId,
        title: &str,
        notes: Option<&str>,
        cost: i64,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE rewards SET title = $2, notes = $3, cost = $4 WHERE id = $1")
            .bind(id.into_inner())
            .bind(title)
            .bind(notes)
            .bind(cost)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Stamp the most recent redemption time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn mark_redeemed(
        conn: &mut PgConnection,
        id: RewardId,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE rewards SET last_redeemed = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(at)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete a reward.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete(conn: &mut PgConnection, id: RewardId) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM rewards WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
