//! Persistence for user accounts and their currency balances.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{User, UserId};

use crate::error::StoreError;

/// Operations on the `users` table.
pub struct UserStore;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    gold: i64,
    gems: i64,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from(row.id),
            username: row.username,
            gold: row.gold,
            gems: row.gems,
            created_at: row.created_at,
        }
    }
}

impl UserStore {
    /// Insert a new user row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails (including a
    /// unique violation on the username).
    pub async fn insert(conn: &mut PgConnection, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO users (id, username, gold, gems, created_at)
              VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(user.gold)
        .bind(user.gems)
        .bind(user.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn fetch(conn: &mut PgConnection, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"SELECT id, username, gold, gems, created_at FROM users WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(User::from))
    }

    /// Whether a username is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn username_taken(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<bool, StoreError> {
        let row: Option<(Uuid,)> =
            sqlx::query_as(r"SELECT id FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(row.is_some())
    }

    /// Write back a user's balances after a wallet mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails (including the
    /// schema's non-negative CHECK, which backstops the wallet).
    pub async fn update_balances(
        conn: &mut PgConnection,
        id: UserId,
        gold: i64,
        gems: i64,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE users SET gold = $2, gems = $3 WHERE id = $1")
            .bind(id.into_inner())
            .bind(gold)
            .bind(gems)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
