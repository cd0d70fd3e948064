//! Challenge operations: lifecycle, participation, and progress.
//!
//! Challenges mirror group join semantics with a flatter permission
//! model: the creator is the only moderator and the only one who may
//! delete. Creation is gold-gated through the ledger.

use warren_db::ChallengeStore;
use warren_social::challenge::{can_delete, can_moderate, CHALLENGE_CREATION_COST};
use warren_social::roles::{approve_transition, join_status};
use warren_social::SocialError;
use warren_types::{
    Challenge, ChallengeId, ChallengeParticipation, ChallengeStatus, Currency, MembershipStatus,
    ParticipationId, UserId, Visibility,
};

use crate::engine::Engine;
use crate::error::EngineError;

/// Input for creating a challenge.
#[derive(Debug, Clone)]
pub struct NewChallenge {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// What participants are trying to achieve.
    pub goal: String,
    /// Public challenges admit joiners immediately.
    pub visibility: Visibility,
}

impl Engine {
    /// Create a challenge: charge the creation fee and auto-join the
    /// creator as an active participant, atomically.
    ///
    /// # Errors
    ///
    /// Conflict when the fee is unaffordable.
    pub async fn create_challenge(
        &self,
        user_id: UserId,
        input: NewChallenge,
    ) -> Result<Challenge, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let user = Self::require_user(&mut tx, user_id).await?;
        let challenge = Challenge {
            id: ChallengeId::new(),
            creator_id: Some(user_id),
            title: input.title,
            description: input.description,
            goal: input.goal,
            visibility: input.visibility,
            status: ChallengeStatus::Pending,
            created_at: now,
        };
        self.debit(
            &mut tx,
            &user,
            Currency::Gold,
            CHALLENGE_CREATION_COST,
            "CHALLENGE_CREATION",
            Some(challenge.id.into_inner()),
        )
        .await?;
        ChallengeStore::insert(&mut tx, &challenge).await?;

        let participation = ChallengeParticipation {
            id: ParticipationId::new(),
            user_id,
            challenge_id: challenge.id,
            status: MembershipStatus::Active,
            progress: 0,
            completed: false,
            completion_time: None,
            joined_at: now,
        };
        ChallengeStore::insert_participation(&mut tx, &participation).await?;
        tx.commit().await?;

        tracing::info!(challenge = %challenge.id, creator = %user_id, "Challenge created");
        Ok(challenge)
    }

    /// List all public challenges, newest first.
    pub async fn list_public_challenges(&self) -> Result<Vec<Challenge>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let challenges = ChallengeStore::list_public(&mut tx).await?;
        tx.commit().await?;
        Ok(challenges)
    }

    /// Join a challenge: public challenges admit immediately, private
    /// ones queue for creator approval.
    ///
    /// # Errors
    ///
    /// Conflict when a participation (of either status) already exists.
    pub async fn join_challenge(
        &self,
        challenge_id: ChallengeId,
        user_id: UserId,
    ) -> Result<ChallengeParticipation, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let challenge = Self::require_challenge(&mut tx, challenge_id).await?;
        let _ = Self::require_user(&mut tx, user_id).await?;
        if ChallengeStore::fetch_participation_for_user(&mut tx, user_id, challenge_id)
            .await?
            .is_some()
        {
            return Err(EngineError::Conflict(
                "You are already participating in this challenge or have a pending request."
                    .to_owned(),
            ));
        }

        let participation = ChallengeParticipation {
            id: ParticipationId::new(),
            user_id,
            challenge_id,
            status: join_status(challenge.visibility),
            progress: 0,
            completed: false,
            completion_time: None,
            joined_at: now,
        };
        ChallengeStore::insert_participation(&mut tx, &participation)
            .await
            .map_err(|err| {
                if err.is_unique_violation() {
                    EngineError::Conflict(
                        "You are already participating in this challenge or have a pending \
                         request."
                            .to_owned(),
                    )
                } else {
                    err.into()
                }
            })?;
        tx.commit().await?;

        tracing::info!(challenge = %challenge_id, user = %user_id, status = ?participation.status, "Joined challenge");
        Ok(participation)
    }

    /// Approve a pending participation request (creator only).
    pub async fn approve_participation(
        &self,
        participation_id: ParticipationId,
        acting_user_id: UserId,
    ) -> Result<ChallengeParticipation, EngineError> {
        let mut tx = self.pool().begin().await?;

        let participation = Self::require_participation(&mut tx, participation_id).await?;
        let challenge = Self::require_challenge(&mut tx, participation.challenge_id).await?;
        if !can_moderate(&challenge, acting_user_id) {
            return Err(EngineError::Forbidden(
                "Only the challenge creator may approve join requests.".to_owned(),
            ));
        }

        let next = approve_transition(participation.status)?;
        ChallengeStore::set_participation_status(&mut tx, participation.id, next).await?;
        tx.commit().await?;

        tracing::info!(challenge = %challenge.id, user = %participation.user_id, "Participation approved");
        Ok(ChallengeParticipation {
            status: next,
            ..participation
        })
    }

    /// Reject a pending participation request (creator only); the row is
    /// removed.
    pub async fn reject_participation(
        &self,
        participation_id: ParticipationId,
        acting_user_id: UserId,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;

        let participation = Self::require_participation(&mut tx, participation_id).await?;
        let challenge = Self::require_challenge(&mut tx, participation.challenge_id).await?;
        if !can_moderate(&challenge, acting_user_id) {
            return Err(EngineError::Forbidden(
                "Only the challenge creator may reject join requests.".to_owned(),
            ));
        }
        if participation.status != MembershipStatus::Pending {
            return Err(SocialError::NotPending {
                status: participation.status,
            }
            .into());
        }
        ChallengeStore::delete_participation(&mut tx, participation.id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Leave a challenge: removes the caller's own participation row
    /// (pending or active).
    pub async fn leave_challenge(
        &self,
        challenge_id: ChallengeId,
        user_id: UserId,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;
        let participation =
            ChallengeStore::fetch_participation_for_user(&mut tx, user_id, challenge_id)
                .await?
                .ok_or_else(|| {
                    EngineError::NotFound(
                        "You are not participating in this challenge.".to_owned(),
                    )
                })?;
        ChallengeStore::delete_participation(&mut tx, participation.id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Record the caller's progress in a challenge; the completion time
    /// is stamped once, on the transition into `completed`.
    ///
    /// # Errors
    ///
    /// Conflict when the participation is still pending.
    pub async fn update_progress(
        &self,
        challenge_id: ChallengeId,
        user_id: UserId,
        progress: i32,
        completed: bool,
    ) -> Result<ChallengeParticipation, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let participation =
            ChallengeStore::fetch_participation_for_user(&mut tx, user_id, challenge_id)
                .await?
                .ok_or_else(|| {
                    EngineError::NotFound(
                        "You are not participating in this challenge.".to_owned(),
                    )
                })?;
        if participation.status != MembershipStatus::Active {
            return Err(EngineError::Conflict(
                "Your participation is still awaiting approval.".to_owned(),
            ));
        }

        let completion_time = if completed {
            participation.completion_time.or(Some(now))
        } else {
            participation.completion_time
        };
        ChallengeStore::update_progress(
            &mut tx,
            participation.id,
            progress,
            completed,
            completion_time,
        )
        .await?;
        tx.commit().await?;

        Ok(ChallengeParticipation {
            progress,
            completed,
            completion_time,
            ..participation
        })
    }

    /// Delete a challenge (creator only); participations cascade.
    pub async fn delete_challenge(
        &self,
        challenge_id: ChallengeId,
        user_id: UserId,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;
        let challenge = Self::require_challenge(&mut tx, challenge_id).await?;

        if !can_delete(&challenge, user_id) {
            return Err(EngineError::Forbidden(
                "Only the challenge creator may delete it.".to_owned(),
            ));
        }
        ChallengeStore::delete(&mut tx, challenge_id).await?;
        tx.commit().await?;

        tracing::info!(challenge = %challenge_id, by = %user_id, "Challenge deleted");
        Ok(())
    }

    /// Load a challenge or fail with `NotFound`.
    async fn require_challenge(
        conn: &mut sqlx::PgConnection,
        challenge_id: ChallengeId,
    ) -> Result<Challenge, EngineError> {
        ChallengeStore::fetch(conn, challenge_id)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound(format!("Challenge \"{challenge_id}\" not found."))
            })
    }

    /// Load a participation row or fail with `NotFound`.
    async fn require_participation(
        conn: &mut sqlx::PgConnection,
        participation_id: ParticipationId,
    ) -> Result<ChallengeParticipation, EngineError> {
        ChallengeStore::fetch_participation(conn, participation_id)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound(format!(
                    "Participation \"{participation_id}\" not found."
                ))
            })
    }
}
