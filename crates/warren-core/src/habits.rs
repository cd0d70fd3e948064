//! Habit operations: CRUD, logging, paid difficulty changes, deletion.
//!
//! The mutating operations here are the heart of the progression engine.
//! Each one runs as a single transaction over the precondition reads, the
//! ledger, the pet, the habit row, and the append-only log.

use warren_db::{HabitStore, PetStore};
use warren_pet::stats;
use warren_tasks::difficulty::free_deletion_streak;
use warren_tasks::habit::{
    ensure_free_deletion, plan_difficulty_change, plan_log, DifficultyChange,
};
use warren_types::{
    Currency, Difficulty, Habit, HabitId, HabitKind, HabitLog, HabitLogId, PetStat, UserId,
};

use crate::engine::Engine;
use crate::error::EngineError;

/// Input for creating a habit.
#[derive(Debug, Clone)]
pub struct NewHabit {
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Direction of the habit.
    pub kind: HabitKind,
    /// Reward/cost tier.
    pub difficulty: Difficulty,
}

/// Input for the ordinary (unpaid) habit update.
///
/// `difficulty` is accepted only when unchanged; an actual tier change is
/// rejected toward the paid path.
#[derive(Debug, Clone)]
pub struct HabitUpdate {
    /// New title.
    pub title: String,
    /// New notes.
    pub notes: Option<String>,
    /// New direction.
    pub kind: HabitKind,
    /// New pause flag.
    pub is_paused: bool,
    /// Tier, if the caller sent one; must match the current tier.
    pub difficulty: Option<Difficulty>,
}

/// The result of logging a habit.
#[derive(Debug, Clone)]
pub struct HabitLogOutcome {
    /// The habit after the log.
    pub habit: Habit,
    /// Human-readable confirmation.
    pub message: String,
    /// The gold actually granted (zero for negative logs and locked
    /// habits).
    pub gold_change: i64,
}

impl Engine {
    /// Create a habit.
    pub async fn create_habit(
        &self,
        user_id: UserId,
        input: NewHabit,
    ) -> Result<Habit, EngineError> {
        let mut tx = self.pool().begin().await?;
        // The owner must exist; everything else about the row is free-form.
        let _ = Self::require_user(&mut tx, user_id).await?;

        let habit = Habit {
            id: HabitId::new(),
            user_id,
            title: input.title,
            notes: input.notes,
            kind: input.kind,
            difficulty: input.difficulty,
            is_paused: false,
            positive_counter: 0,
            negative_counter: 0,
            current_streak: 0,
            longest_streak: 0,
            gold_reward_locked_until: None,
            created_at: self.clock().now(),
        };
        HabitStore::insert(&mut tx, &habit).await?;
        tx.commit().await?;
        Ok(habit)
    }

    /// Fetch a habit the caller owns.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent, Forbidden when owned by someone else.
    pub async fn get_habit(
        &self,
        habit_id: HabitId,
        user_id: UserId,
    ) -> Result<Habit, EngineError> {
        let mut tx = self.pool().begin().await?;
        let habit = Self::require_owned_habit(&mut tx, habit_id, user_id).await?;
        tx.commit().await?;
        Ok(habit)
    }

    /// List the caller's habits, newest first.
    pub async fn list_habits(&self, user_id: UserId) -> Result<Vec<Habit>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let habits = HabitStore::list_for_user(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(habits)
    }

    /// Update a habit's metadata on the unpaid path.
    ///
    /// # Errors
    ///
    /// Forbidden when the input carries a difficulty different from the
    /// current tier -- tier changes go through
    /// [`Engine::pay_to_update_difficulty`].
    pub async fn update_habit(
        &self,
        habit_id: HabitId,
        user_id: UserId,
        input: HabitUpdate,
    ) -> Result<Habit, EngineError> {
        let mut tx = self.pool().begin().await?;
        let habit = Self::require_owned_habit(&mut tx, habit_id, user_id).await?;

        if let Some(difficulty) = input.difficulty
            && difficulty != habit.difficulty
        {
            return Err(EngineError::Forbidden(
                "Difficulty must be changed via the paid update.".to_owned(),
            ));
        }

        HabitStore::update_meta(
            &mut tx,
            habit_id,
            &input.title,
            input.notes.as_deref(),
            input.kind,
            input.is_paused,
        )
        .await?;
        tx.commit().await?;

        Ok(Habit {
            title: input.title,
            notes: input.notes,
            kind: input.kind,
            is_paused: input.is_paused,
            ..habit
        })
    }

    /// Log a habit for today.
    ///
    /// Inside one transaction: the same-day guard, the streak recompute,
    /// the counters, the gold credit (difficulty-scaled, suppressed by an
    /// active reward lock), the pet happiness grant, and the immutable
    /// log row.
    pub async fn log_habit(
        &self,
        habit_id: HabitId,
        user_id: UserId,
        completed: bool,
        notes: Option<String>,
    ) -> Result<HabitLogOutcome, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let habit = Self::require_owned_habit(&mut tx, habit_id, user_id).await?;
        let last_log_day = HabitStore::latest_log_at(&mut tx, habit_id)
            .await?
            .map(|at| at.date_naive());

        let plan = plan_log(&habit, completed, last_log_day, now)?;

        if plan.gold > 0 {
            let user = Self::require_user(&mut tx, user_id).await?;
            self.credit(
                &mut tx,
                &user,
                Currency::Gold,
                plan.gold,
                "HABIT_REWARD",
                Some(habit_id.into_inner()),
            )
            .await?;
        }

        if plan.happiness > 0 {
            let mut pet = Self::require_pet(&mut tx, user_id).await?;
            stats::apply_raise(&mut pet, PetStat::Happiness, plan.happiness);
            PetStore::update_stats(&mut tx, &pet).await?;
        }

        HabitStore::apply_log_effects(
            &mut tx,
            habit_id,
            plan.new_streak,
            plan.new_longest_streak,
            plan.new_positive_counter,
            plan.new_negative_counter,
        )
        .await?;

        let log = HabitLog {
            id: HabitLogId::new(),
            habit_id,
            user_id,
            completed,
            notes,
            logged_at: now,
        };
        HabitStore::insert_log(&mut tx, &log).await.map_err(|err| {
            // A concurrent log slipped past the read; the unique
            // one-per-day index serializes the race.
            if err.is_unique_violation() {
                EngineError::Conflict("This habit has already been logged today.".to_owned())
            } else {
                err.into()
            }
        })?;

        tx.commit().await?;

        tracing::info!(
            habit = %habit_id,
            user = %user_id,
            completed,
            gold = plan.gold,
            streak = plan.new_streak,
            "Habit logged"
        );

        Ok(HabitLogOutcome {
            habit: Habit {
                positive_counter: plan.new_positive_counter,
                negative_counter: plan.new_negative_counter,
                current_streak: plan.new_streak,
                longest_streak: plan.new_longest_streak,
                ..habit
            },
            message: "Habit logged successfully!".to_owned(),
            gold_change: plan.gold,
        })
    }

    /// List a habit's logs, newest first.
    pub async fn list_habit_logs(
        &self,
        habit_id: HabitId,
        user_id: UserId,
    ) -> Result<Vec<HabitLog>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_owned_habit(&mut tx, habit_id, user_id).await?;
        let logs = HabitStore::list_logs(&mut tx, habit_id).await?;
        tx.commit().await?;
        Ok(logs)
    }

    /// Change a habit's difficulty on the paid path.
    ///
    /// Upgrades are free and impose the 7-day gold lock; downgrades
    /// charge the tier-pair fee and clear any existing lock, atomically
    /// with the tier change.
    pub async fn pay_to_update_difficulty(
        &self,
        habit_id: HabitId,
        user_id: UserId,
        new_difficulty: Difficulty,
    ) -> Result<Habit, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let habit = Self::require_owned_habit(&mut tx, habit_id, user_id).await?;
        let change = plan_difficulty_change(habit.difficulty, new_difficulty, now)?;

        let locked_until = match change {
            DifficultyChange::Upgrade { locked_until } => Some(locked_until),
            DifficultyChange::Downgrade { cost } => {
                let user = Self::require_user(&mut tx, user_id).await?;
                self.debit(
                    &mut tx,
                    &user,
                    Currency::Gold,
                    cost,
                    "DIFFICULTY_CHANGE",
                    Some(habit_id.into_inner()),
                )
                .await?;
                None
            }
        };

        HabitStore::set_difficulty(&mut tx, habit_id, new_difficulty, locked_until).await?;
        tx.commit().await?;

        tracing::info!(
            habit = %habit_id,
            from = ?habit.difficulty,
            to = ?new_difficulty,
            "Habit difficulty changed"
        );

        Ok(Habit {
            difficulty: new_difficulty,
            gold_reward_locked_until: locked_until,
            ..habit
        })
    }

    /// Delete a habit for free -- available once its streak reaches the
    /// per-tier threshold.
    ///
    /// # Errors
    ///
    /// Forbidden below the threshold, directing the caller to the paid
    /// deletion.
    pub async fn delete_habit(
        &self,
        habit_id: HabitId,
        user_id: UserId,
    ) -> Result<String, EngineError> {
        let mut tx = self.pool().begin().await?;
        let habit = Self::require_owned_habit(&mut tx, habit_id, user_id).await?;

        ensure_free_deletion(&habit)?;
        HabitStore::delete(&mut tx, habit_id).await?;
        tx.commit().await?;

        let required = free_deletion_streak(habit.difficulty);
        Ok(format!(
            "Habit deleted for free after reaching a {required}-day streak!"
        ))
    }

    /// Delete a habit below its streak threshold by paying the per-tier
    /// fee, atomically with the deletion.
    pub async fn pay_to_delete_habit(
        &self,
        habit_id: HabitId,
        user_id: UserId,
    ) -> Result<String, EngineError> {
        let mut tx = self.pool().begin().await?;
        let habit = Self::require_owned_habit(&mut tx, habit_id, user_id).await?;
        let user = Self::require_user(&mut tx, user_id).await?;

        let fee = warren_tasks::difficulty::deletion_fee(habit.difficulty);
        self.debit(
            &mut tx,
            &user,
            Currency::Gold,
            fee,
            "HABIT_DELETION",
            Some(habit_id.into_inner()),
        )
        .await?;
        HabitStore::delete(&mut tx, habit_id).await?;
        tx.commit().await?;

        Ok(format!("Successfully paid {fee} gold to delete the habit."))
    }

    /// Load a habit and verify the caller owns it.
    pub(crate) async fn require_owned_habit(
        conn: &mut sqlx::PgConnection,
        habit_id: HabitId,
        user_id: UserId,
    ) -> Result<Habit, EngineError> {
        let habit = HabitStore::fetch(conn, habit_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Habit \"{habit_id}\" not found.")))?;
        if habit.user_id != user_id {
            return Err(EngineError::Forbidden(
                "You do not have permission to access this habit.".to_owned(),
            ));
        }
        Ok(habit)
    }
}
