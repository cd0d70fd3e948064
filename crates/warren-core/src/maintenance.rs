//! The nightly maintenance batch.
//!
//! Invoked by an external scheduler (see the `warren-nightly` binary).
//! One transaction, two batched updates:
//!
//! 1. Reset every completed daily's flag so the new day starts fresh.
//! 2. Reset the streak of every non-paused habit whose most recent log is
//!    absent or strictly before yesterday (UTC calendar comparison).
//!    Habits last logged yesterday are untouched -- today's log simply
//!    has not happened yet.

use warren_db::{DailyStore, HabitStore};
use warren_tasks::streak::streak_expired;

use crate::engine::Engine;
use crate::error::EngineError;

/// Counts from one nightly maintenance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Dailies whose completed flag was reset.
    pub dailies_reset: u64,
    /// Habits whose streak was reset to zero.
    pub streaks_reset: u64,
}

impl Engine {
    /// Run the nightly maintenance batch.
    ///
    /// Both updates commit together; a failure in either rolls back the
    /// whole run, leaving it safe to retry.
    pub async fn run_nightly_maintenance(&self) -> Result<MaintenanceReport, EngineError> {
        let today = self.clock().today();
        let mut tx = self.pool().begin().await?;

        let dailies_reset = DailyStore::reset_completed(&mut tx).await?;

        let candidates = HabitStore::streak_candidates(&mut tx).await?;
        let expired: Vec<uuid::Uuid> = candidates
            .iter()
            .filter(|candidate| {
                // The query already filtered paused habits and zero streaks.
                streak_expired(
                    false,
                    candidate.current_streak,
                    candidate.last_logged_at.map(|at| at.date_naive()),
                    today,
                )
            })
            .map(|candidate| candidate.id)
            .collect();
        let streaks_reset = HabitStore::reset_streaks(&mut tx, &expired).await?;

        tx.commit().await?;

        tracing::info!(dailies_reset, streaks_reset, "Nightly maintenance completed");
        Ok(MaintenanceReport {
            dailies_reset,
            streaks_reset,
        })
    }
}
