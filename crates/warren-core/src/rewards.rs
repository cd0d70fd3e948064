//! Reward operations: CRUD and redemption.

use warren_db::RewardStore;
use warren_types::{Currency, Reward, RewardId, UserId};

use crate::engine::Engine;
use crate::error::EngineError;

/// Input for creating a reward.
#[derive(Debug, Clone)]
pub struct NewReward {
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Gold price of one redemption.
    pub cost: i64,
}

/// Input for updating a reward's metadata.
#[derive(Debug, Clone)]
pub struct RewardUpdate {
    /// New title.
    pub title: String,
    /// New notes.
    pub notes: Option<String>,
    /// New price.
    pub cost: i64,
}

/// The result of redeeming a reward.
#[derive(Debug, Clone)]
pub struct RedeemOutcome {
    /// The reward after redemption.
    pub reward: Reward,
    /// Human-readable confirmation.
    pub message: String,
    /// The caller's gold balance after the debit.
    pub new_gold_balance: i64,
}

impl Engine {
    /// Create a reward.
    pub async fn create_reward(
        &self,
        user_id: UserId,
        input: NewReward,
    ) -> Result<Reward, EngineError> {
        if input.cost < 0 {
            return Err(EngineError::BadRequest(
                "Reward cost must not be negative.".to_owned(),
            ));
        }
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_user(&mut tx, user_id).await?;

        let reward = Reward {
            id: RewardId::new(),
            user_id,
            title: input.title,
            notes: input.notes,
            cost: input.cost,
            last_redeemed: None,
            created_at: self.clock().now(),
        };
        RewardStore::insert(&mut tx, &reward).await?;
        tx.commit().await?;
        Ok(reward)
    }

    /// List the caller's rewards, newest first.
    pub async fn list_rewards(&self, user_id: UserId) -> Result<Vec<Reward>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let rewards = RewardStore::list_for_user(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(rewards)
    }

    /// Update a reward's metadata.
    pub async fn update_reward(
        &self,
        reward_id: RewardId,
        user_id: UserId,
        input: RewardUpdate,
    ) -> Result<Reward, EngineError> {
        if input.cost < 0 {
            return Err(EngineError::BadRequest(
                "Reward cost must not be negative.".to_owned(),
            ));
        }
        let mut tx = self.pool().begin().await?;
        let reward = Self::require_owned_reward(&mut tx, reward_id, user_id).await?;

        RewardStore::update_meta(
            &mut tx,
            reward_id,
            &input.title,
            input.notes.as_deref(),
            input.cost,
        )
        .await?;
        tx.commit().await?;

        Ok(Reward {
            title: input.title,
            notes: input.notes,
            cost: input.cost,
            ..reward
        })
    }

    /// Delete a reward.
    pub async fn delete_reward(
        &self,
        reward_id: RewardId,
        user_id: UserId,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_owned_reward(&mut tx, reward_id, user_id).await?;
        RewardStore::delete(&mut tx, reward_id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Redeem a reward: debit its gold cost and stamp the redemption
    /// time, atomically.
    ///
    /// # Errors
    ///
    /// Conflict when the caller cannot afford it; gold is left unchanged.
    pub async fn redeem_reward(
        &self,
        reward_id: RewardId,
        user_id: UserId,
    ) -> Result<RedeemOutcome, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let reward = Self::require_owned_reward(&mut tx, reward_id, user_id).await?;
        let user = Self::require_user(&mut tx, user_id).await?;

        let wallet = self
            .debit(
                &mut tx,
                &user,
                Currency::Gold,
                reward.cost,
                "REWARD_REDEMPTION",
                Some(reward_id.into_inner()),
            )
            .await?;
        RewardStore::mark_redeemed(&mut tx, reward_id, now).await?;
        tx.commit().await?;

        tracing::info!(reward = %reward_id, user = %user_id, cost = reward.cost, "Reward redeemed");

        Ok(RedeemOutcome {
            reward: Reward {
                last_redeemed: Some(now),
                ..reward
            },
            message: "Reward redeemed!".to_owned(),
            new_gold_balance: wallet.gold,
        })
    }

    /// Load a reward and verify the caller owns it.
    pub(crate) async fn require_owned_reward(
        conn: &mut sqlx::PgConnection,
        reward_id: RewardId,
        user_id: UserId,
    ) -> Result<Reward, EngineError> {
        let reward = RewardStore::fetch(conn, reward_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Reward \"{reward_id}\" not found.")))?;
        if reward.user_id != user_id {
            return Err(EngineError::Forbidden(
                "You do not have permission to access this reward.".to_owned(),
            ));
        }
        Ok(reward)
    }
}
