//! Daily operations: CRUD and once-per-day completion.

use warren_db::{DailyStore, PetStore};
use warren_pet::stats;
use warren_tasks::daily::plan_completion;
use warren_types::{Currency, Daily, DailyId, DailyLog, DailyLogId, Difficulty, PetStat, UserId};

use crate::engine::Engine;
use crate::error::EngineError;

/// Input for creating a daily.
#[derive(Debug, Clone)]
pub struct NewDaily {
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Reward tier.
    pub difficulty: Difficulty,
}

/// Input for updating a daily's metadata.
#[derive(Debug, Clone)]
pub struct DailyUpdate {
    /// New title.
    pub title: String,
    /// New notes.
    pub notes: Option<String>,
    /// New tier.
    pub difficulty: Difficulty,
}

/// The result of completing a daily.
#[derive(Debug, Clone)]
pub struct DailyOutcome {
    /// The daily after completion.
    pub daily: Daily,
    /// Human-readable confirmation.
    pub message: String,
    /// The gold actually granted (zero while the reward lock is active).
    pub gold_change: i64,
}

impl Engine {
    /// Create a daily.
    pub async fn create_daily(
        &self,
        user_id: UserId,
        input: NewDaily,
    ) -> Result<Daily, EngineError> {
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_user(&mut tx, user_id).await?;

        let daily = Daily {
            id: DailyId::new(),
            user_id,
            title: input.title,
            notes: input.notes,
            difficulty: input.difficulty,
            completed: false,
            last_completed: None,
            gold_reward_locked_until: None,
            created_at: self.clock().now(),
        };
        DailyStore::insert(&mut tx, &daily).await?;
        tx.commit().await?;
        Ok(daily)
    }

    /// Fetch a daily the caller owns.
    pub async fn get_daily(
        &self,
        daily_id: DailyId,
        user_id: UserId,
    ) -> Result<Daily, EngineError> {
        let mut tx = self.pool().begin().await?;
        let daily = Self::require_owned_daily(&mut tx, daily_id, user_id).await?;
        tx.commit().await?;
        Ok(daily)
    }

    /// List the caller's dailies, newest first.
    pub async fn list_dailies(&self, user_id: UserId) -> Result<Vec<Daily>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let dailies = DailyStore::list_for_user(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(dailies)
    }

    /// Update a daily's metadata.
    pub async fn update_daily(
        &self,
        daily_id: DailyId,
        user_id: UserId,
        input: DailyUpdate,
    ) -> Result<Daily, EngineError> {
        let mut tx = self.pool().begin().await?;
        let daily = Self::require_owned_daily(&mut tx, daily_id, user_id).await?;

        DailyStore::update_meta(
            &mut tx,
            daily_id,
            &input.title,
            input.notes.as_deref(),
            input.difficulty,
        )
        .await?;
        tx.commit().await?;

        Ok(Daily {
            title: input.title,
            notes: input.notes,
            difficulty: input.difficulty,
            ..daily
        })
    }

    /// Delete a daily.
    pub async fn delete_daily(
        &self,
        daily_id: DailyId,
        user_id: UserId,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_owned_daily(&mut tx, daily_id, user_id).await?;
        DailyStore::delete(&mut tx, daily_id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Complete a daily for today.
    ///
    /// Conflict when it was already completed on the current calendar
    /// day. Grants gold by the habit difficulty table (suppressed by an
    /// active reward lock) and pet happiness, flips the flag, stamps the
    /// completion time, and appends the log -- one transaction.
    pub async fn complete_daily(
        &self,
        daily_id: DailyId,
        user_id: UserId,
        notes: Option<String>,
    ) -> Result<DailyOutcome, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let daily = Self::require_owned_daily(&mut tx, daily_id, user_id).await?;
        let plan = plan_completion(&daily, now)?;

        if plan.gold > 0 {
            let user = Self::require_user(&mut tx, user_id).await?;
            self.credit(
                &mut tx,
                &user,
                Currency::Gold,
                plan.gold,
                "DAILY_REWARD",
                Some(daily_id.into_inner()),
            )
            .await?;
        }

        let mut pet = Self::require_pet(&mut tx, user_id).await?;
        stats::apply_raise(&mut pet, PetStat::Happiness, plan.happiness);
        PetStore::update_stats(&mut tx, &pet).await?;

        DailyStore::mark_completed(&mut tx, daily_id, now).await?;
        let log = DailyLog {
            id: DailyLogId::new(),
            daily_id,
            user_id,
            notes,
            logged_at: now,
        };
        DailyStore::insert_log(&mut tx, &log).await?;
        tx.commit().await?;

        tracing::info!(daily = %daily_id, user = %user_id, gold = plan.gold, "Daily completed");

        Ok(DailyOutcome {
            daily: Daily {
                completed: true,
                last_completed: Some(now),
                ..daily
            },
            message: "Daily completed!".to_owned(),
            gold_change: plan.gold,
        })
    }

    /// Load a daily and verify the caller owns it.
    pub(crate) async fn require_owned_daily(
        conn: &mut sqlx::PgConnection,
        daily_id: DailyId,
        user_id: UserId,
    ) -> Result<Daily, EngineError> {
        let daily = DailyStore::fetch(conn, daily_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Daily \"{daily_id}\" not found.")))?;
        if daily.user_id != user_id {
            return Err(EngineError::Forbidden(
                "You do not have permission to access this daily.".to_owned(),
            ));
        }
        Ok(daily)
    }
}
