//! Persistence for dailies and their completion logs.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{Daily, DailyId, DailyLog, Difficulty, UserId};

use crate::codec::{difficulty_from_db, difficulty_to_db};
use crate::error::StoreError;

/// Operations on the `dailies` and `daily_logs` tables.
pub struct DailyStore;

/// A row from the `dailies` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct DailyRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    notes: Option<String>,
    difficulty: String,
    completed: bool,
    last_completed: Option<DateTime<Utc>>,
    gold_reward_locked_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl DailyRow {
    fn into_domain(self) -> Result<Daily, StoreError> {
        Ok(Daily {
            id: DailyId::from(self.id),
            user_id: UserId::from(self.user_id),
            title: self.title,
            notes: self.notes,
            difficulty: difficulty_from_db(&self.difficulty)?,
            completed: self.completed,
            last_completed: self.last_completed,
            gold_reward_locked_until: self.gold_reward_locked_until,
            created_at: self.created_at,
        })
    }
}

const SELECT_DAILY: &str = r"SELECT id, user_id, title, notes,
       difficulty::TEXT as difficulty, completed, last_completed,
       gold_reward_locked_until, created_at
  FROM dailies";

impl DailyStore {
    /// Insert a new daily row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert(conn: &mut PgConnection, daily: &Daily) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO dailies (id, user_id, title, notes, difficulty, completed,
                                   last_completed, gold_reward_locked_until, created_at)
              VALUES ($1, $2, $3, $4, $5::difficulty, $6, $7, $8, $9)",
        )
        .bind(daily.id.into_inner())
        .bind(daily.user_id.into_inner())
        .bind(&daily.title)
        .bind(&daily.notes)
        .bind(difficulty_to_db(daily.difficulty))
        .bind(daily.completed)
        .bind(daily.last_completed)
        .bind(daily.gold_reward_locked_until)
        .bind(daily.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a daily by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch(conn: &mut PgConnection, id: DailyId) -> Result<Option<Daily>, StoreError> {
        let row = sqlx::query_as::<_, DailyRow>(&format!("{SELECT_DAILY} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        row.map(DailyRow::into_domain).transpose()
    }

    /// List all dailies owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<Daily>, StoreError> {
        let rows = sqlx::query_as::<_, DailyRow>(&format!(
            "{SELECT_DAILY} WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(DailyRow::into_domain).collect()
    }

    /// Update a daily's editable metadata.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn update_meta(
        conn: &mut PgConnection,
        id: DailyId,
        title: &str,
        notes: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE dailies SET title = $2, notes = $3, difficulty = $4::difficulty
               WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(title)
        .bind(notes)
        .bind(difficulty_to_db(difficulty))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Mark a daily completed at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn mark_completed(
        conn: &mut PgConnection,
        id: DailyId,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE dailies SET completed = TRUE, last_completed = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(at)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete a daily (logs cascade).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete(conn: &mut PgConnection, id: DailyId) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM dailies WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Append an immutable completion log row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert_log(conn: &mut PgConnection, log: &DailyLog) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO daily_logs (id, daily_id, user_id, notes, logged_at)
              VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(log.id.into_inner())
        .bind(log.daily_id.into_inner())
        .bind(log.user_id.into_inner())
        .bind(&log.notes)
        .bind(log.logged_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Reset the completed flag on every completed daily (the nightly
    /// batch). Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn reset_completed(conn: &mut PgConnection) -> Result<u64, StoreError> {
        let result = sqlx::query(r"UPDATE dailies SET completed = FALSE WHERE completed = TRUE")
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
