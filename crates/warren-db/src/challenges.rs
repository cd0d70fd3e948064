//! Persistence for challenges and participations.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{
    Challenge, ChallengeId, ChallengeParticipation, MembershipStatus, ParticipationId, UserId,
};

use crate::codec::{
    challenge_status_from_db, challenge_status_to_db, membership_status_from_db,
    membership_status_to_db, visibility_from_db, visibility_to_db,
};
use crate::error::StoreError;

/// Operations on the `challenges` and `challenge_participations` tables.
pub struct ChallengeStore;

/// A row from the `challenges` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ChallengeRow {
    id: Uuid,
    creator_id: Option<Uuid>,
    title: String,
    description: String,
    goal: String,
    visibility: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl ChallengeRow {
    fn into_domain(self) -> Result<Challenge, StoreError> {
        Ok(Challenge {
            id: ChallengeId::from(self.id),
            creator_id: self.creator_id.map(UserId::from),
            title: self.title,
            description: self.description,
            goal: self.goal,
            visibility: visibility_from_db(&self.visibility)?,
            status: challenge_status_from_db(&self.status)?,
            created_at: self.created_at,
        })
    }
}

/// A row from the `challenge_participations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ParticipationRow {
    id: Uuid,
    user_id: Uuid,
    challenge_id: Uuid,
    status: String,
    progress: i32,
    completed: bool,
    completion_time: Option<DateTime<Utc>>,
    joined_at: DateTime<Utc>,
}

impl ParticipationRow {
    fn into_domain(self) -> Result<ChallengeParticipation, StoreError> {
        Ok(ChallengeParticipation {
            id: ParticipationId::from(self.id),
            user_id: UserId::from(self.user_id),
            challenge_id: ChallengeId::from(self.challenge_id),
            status: membership_status_from_db(&self.status)?,
            progress: self.progress,
            completed: self.completed,
            completion_time: self.completion_time,
            joined_at: self.joined_at,
        })
    }
}

const SELECT_CHALLENGE: &str = r"SELECT id, creator_id, title, description, goal,
       visibility::TEXT as visibility, status::TEXT as status, created_at
  FROM challenges";

const SELECT_PARTICIPATION: &str = r"SELECT id, user_id, challenge_id,
       status::TEXT as status, progress, completed, completion_time, joined_at
  FROM challenge_participations";

impl ChallengeStore {
    /// Insert a new challenge row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert(conn: &mut PgConnection, challenge: &Challenge) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO challenges (id, creator_id, title, description, goal,
                                      visibility, status, created_at)
              VALUES ($1, $2, $3, $4, $5, $6::visibility, $7::challenge_status, $8)",
        )
        .bind(challenge.id.into_inner())
        .bind(challenge.creator_id.map(UserId::into_inner))
        .bind(&challenge.title)
        .bind(&challenge.description)
        .bind(&challenge.goal)
        .bind(visibility_to_db(challenge.visibility))
        .bind(challenge_status_to_db(challenge.status))
        .bind(challenge.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a challenge by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch(
        conn: &mut PgConnection,
        id: ChallengeId,
    ) -> Result<Option<Challenge>, StoreError> {
        let row = sqlx::query_as::<_, ChallengeRow>(&format!("{SELECT_CHALLENGE} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        row.map(ChallengeRow::into_domain).transpose()
    }

    /// List all public challenges, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_public(conn: &mut PgConnection) -> Result<Vec<Challenge>, StoreError> {
        let rows = sqlx::query_as::<_, ChallengeRow>(&format!(
            "{SELECT_CHALLENGE} WHERE visibility = 'public' ORDER BY created_at DESC"
        ))
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(ChallengeRow::into_domain).collect()
    }

    /// Delete a challenge (participations cascade).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete(conn: &mut PgConnection, id: ChallengeId) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM challenges WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    // -- participations -----------------------------------------------------

    /// Insert a participation row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails (including the
    /// one-participation-per-user unique constraint).
    pub async fn insert_participation(
        conn: &mut PgConnection,
        participation: &ChallengeParticipation,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO challenge_participations
                  (id, user_id, challenge_id, status, progress, completed,
                   completion_time, joined_at)
              VALUES ($1, $2, $3, $4::membership_status, $5, $6, $7, $8)",
        )
        .bind(participation.id.into_inner())
        .bind(participation.user_id.into_inner())
        .bind(participation.challenge_id.into_inner())
        .bind(membership_status_to_db(participation.status))
        .bind(participation.progress)
        .bind(participation.completed)
        .bind(participation.completion_time)
        .bind(participation.joined_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a participation row by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch_participation(
        conn: &mut PgConnection,
        id: ParticipationId,
    ) -> Result<Option<ChallengeParticipation>, StoreError> {
        let row = sqlx::query_as::<_, ParticipationRow>(&format!(
            "{SELECT_PARTICIPATION} WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await?;
        row.map(ParticipationRow::into_domain).transpose()
    }

    /// Fetch a user's participation in a challenge.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch_participation_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
        challenge_id: ChallengeId,
    ) -> Result<Option<ChallengeParticipation>, StoreError> {
        let row = sqlx::query_as::<_, ParticipationRow>(&format!(
            "{SELECT_PARTICIPATION} WHERE user_id = $1 AND challenge_id = $2"
        ))
        .bind(user_id.into_inner())
        .bind(challenge_id.into_inner())
        .fetch_optional(&mut *conn)
        .await?;
        row.map(ParticipationRow::into_domain).transpose()
    }

    /// Set a participation's status (the approval transition).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn set_participation_status(
        conn: &mut PgConnection,
        id: ParticipationId,
        status: MembershipStatus,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE challenge_participations SET status = $2::membership_status WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(membership_status_to_db(status))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Record a participant's progress, optionally stamping completion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn update_progress(
        conn: &mut PgConnection,
        id: ParticipationId,
        progress: i32,
        completed: bool,
        completion_time: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE challenge_participations
                 SET progress = $2, completed = $3, completion_time = $4
               WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(progress)
        .bind(completed)
        .bind(completion_time)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Delete a participation row (reject or leave).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete_participation(
        conn: &mut PgConnection,
        id: ParticipationId,
    ) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM challenge_participations WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
