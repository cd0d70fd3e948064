//! Persistence for habits and their append-only logs.
//!
//! Includes the two nightly-maintenance queries: collecting streak-expiry
//! candidates (each habit joined with its most recent log) and the batched
//! streak reset over the collected id set.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{Difficulty, Habit, HabitId, HabitKind, HabitLog, HabitLogId, UserId};

use crate::codec::{difficulty_from_db, difficulty_to_db, habit_kind_from_db, habit_kind_to_db};
use crate::error::StoreError;

/// Operations on the `habits` and `habit_logs` tables.
pub struct HabitStore;

/// A row from the `habits` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct HabitRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    notes: Option<String>,
    kind: String,
    difficulty: String,
    is_paused: bool,
    positive_counter: i64,
    negative_counter: i64,
    current_streak: i32,
    longest_streak: i32,
    gold_reward_locked_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl HabitRow {
    fn into_domain(self) -> Result<Habit, StoreError> {
        Ok(Habit {
            id: HabitId::from(self.id),
            user_id: UserId::from(self.user_id),
            title: self.title,
            notes: self.notes,
            kind: habit_kind_from_db(&self.kind)?,
            difficulty: difficulty_from_db(&self.difficulty)?,
            is_paused: self.is_paused,
            positive_counter: self.positive_counter,
            negative_counter: self.negative_counter,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            gold_reward_locked_until: self.gold_reward_locked_until,
            created_at: self.created_at,
        })
    }
}

/// A habit eligible for the nightly streak-expiry check, with the
/// timestamp of its most recent log (if any).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StreakCandidate {
    /// The habit id.
    pub id: Uuid,
    /// The habit's current streak (always positive here).
    pub current_streak: i32,
    /// The most recent log timestamp, if the habit has ever been logged.
    pub last_logged_at: Option<DateTime<Utc>>,
}

const SELECT_HABIT: &str = r"SELECT id, user_id, title, notes, kind::TEXT as kind,
       difficulty::TEXT as difficulty, is_paused, positive_counter, negative_counter,
       current_streak, longest_streak, gold_reward_locked_until, created_at
  FROM habits";

impl HabitStore {
    /// Insert a new habit row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert(conn: &mut PgConnection, habit: &Habit) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO habits (id, user_id, title, notes, kind, difficulty, is_paused,
                                  positive_counter, negative_counter, current_streak,
                                  longest_streak, gold_reward_locked_until, created_at)
              VALUES ($1, $2, $3, $4, $5::habit_kind, $6::difficulty, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(habit.id.into_inner())
        .bind(habit.user_id.into_inner())
        .bind(&habit.title)
        .bind(&habit.notes)
        .bind(habit_kind_to_db(habit.kind))
        .bind(difficulty_to_db(habit.difficulty))
        .bind(habit.is_paused)
        .bind(habit.positive_counter)
        .bind(habit.negative_counter)
        .bind(habit.current_streak)
        .bind(habit.longest_streak)
        .bind(habit.gold_reward_locked_until)
        .bind(habit.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a habit by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch(conn: &mut PgConnection, id: HabitId) -> Result<Option<Habit>, StoreError> {
        let row = sqlx::query_as::<_, HabitRow>(&format!("{SELECT_HABIT} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        row.map(HabitRow::into_domain).transpose()
    }

    /// List all habits owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<Habit>, StoreError> {
        let rows = sqlx::query_as::<_, HabitRow>(&format!(
            "{SELECT_HABIT} WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(HabitRow::into_domain).collect()
    }

    /// Update a habit's editable metadata (title, notes, kind, pause flag).
    ///
    /// Difficulty deliberately has no path through here; it only changes
    /// via [`HabitStore::set_difficulty`] on the paid route.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn update_meta(
        conn: &mut PgConnection,
        id: HabitId,
        title: &str,
        notes: Option<&str>,
        kind: HabitKind,
        is_paused: bool,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE habits
                 SET title = $2, notes = $3, kind = $4::habit_kind, is_paused = $5
               WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(title)
        .bind(notes)
        .bind(habit_kind_to_db(kind))
        .bind(is_paused)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Apply the planned effects of one log: streak, high-water mark, and
    /// the positive/negative counters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn apply_log_effects(
        conn: &mut PgConnection,
        id: HabitId,
        current_streak: i32,
        longest_streak: i32,
        positive_counter: i64,
        negative_counter: i64,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE habits
                 SET current_streak = $2, longest_streak = $3,
                     positive_counter = $4, negative_counter = $5
               WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(current_streak)
        .bind(longest_streak)
        .bind(positive_counter)
        .bind(negative_counter)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Set a habit's difficulty and reward lock (the paid mutation path).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn set_difficulty(
        conn: &mut PgConnection,
        id: HabitId,
        difficulty: Difficulty,
        locked_until: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE habits SET difficulty = $2::difficulty, gold_reward_locked_until = $3
               WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(difficulty_to_db(difficulty))
        .bind(locked_until)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Delete a habit (logs cascade).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete(conn: &mut PgConnection, id: HabitId) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM habits WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Append an immutable log row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails -- including
    /// the unique one-log-per-day index, which the engine surfaces as a
    /// same-day conflict.
    pub async fn insert_log(conn: &mut PgConnection, log: &HabitLog) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO habit_logs (id, habit_id, user_id, completed, notes, logged_at)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(log.id.into_inner())
        .bind(log.habit_id.into_inner())
        .bind(log.user_id.into_inner())
        .bind(log.completed)
        .bind(&log.notes)
        .bind(log.logged_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Timestamp of the habit's most recent log, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn latest_log_at(
        conn: &mut PgConnection,
        id: HabitId,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        let row: Option<(DateTime<Utc>,)> = sqlx::query_as(
            r"SELECT logged_at FROM habit_logs WHERE habit_id = $1
              ORDER BY logged_at DESC LIMIT 1",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(|(at,)| at))
    }

    /// List a habit's logs, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn list_logs(
        conn: &mut PgConnection,
        id: HabitId,
    ) -> Result<Vec<HabitLog>, StoreError> {
        let rows: Vec<(Uuid, Uuid, Uuid, bool, Option<String>, DateTime<Utc>)> = sqlx::query_as(
            r"SELECT id, habit_id, user_id, completed, notes, logged_at
                FROM habit_logs WHERE habit_id = $1 ORDER BY logged_at DESC",
        )
        .bind(id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, habit_id, user_id, completed, notes, logged_at)| HabitLog {
                id: HabitLogId::from(id),
                habit_id: HabitId::from(habit_id),
                user_id: UserId::from(user_id),
                completed,
                notes,
                logged_at,
            })
            .collect())
    }

    /// Collect every non-paused habit with a positive streak, joined with
    /// its most recent log timestamp, for the nightly expiry decision.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn streak_candidates(
        conn: &mut PgConnection,
    ) -> Result<Vec<StreakCandidate>, StoreError> {
        let rows = sqlx::query_as::<_, StreakCandidate>(
            r"SELECT h.id, h.current_streak, MAX(l.logged_at) AS last_logged_at
                FROM habits h
                LEFT JOIN habit_logs l ON l.habit_id = h.id
               WHERE h.is_paused = FALSE AND h.current_streak > 0
               GROUP BY h.id, h.current_streak",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    /// Reset the streak of every habit in `ids` to zero, in one batched
    /// update. Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn reset_streaks(
        conn: &mut PgConnection,
        ids: &[Uuid],
    ) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(r"UPDATE habits SET current_streak = 0 WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
