//! Persistence for one-off to-dos.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{Difficulty, Todo, TodoId, UserId};

use crate::codec::{difficulty_from_db, difficulty_to_db};
use crate::error::StoreError;

/// Operations on the `todos` table.
pub struct TodoStore;

/// A row from the `todos` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct TodoRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    notes: Option<String>,
    difficulty: String,
    completed: bool,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TodoRow {
    fn into_domain(self) -> Result<Todo, StoreError> {
        Ok(Todo {
            id: TodoId::from(self.id),
            user_id: UserId::from(self.user_id),
            title: self.title,
            notes: self.notes,
            difficulty: difficulty_from_db(&self.difficulty)?,
            completed: self.completed,
            due_date: self.due_date,
            created_at: self.created_at,
        })
    }
}

const SELECT_TODO: &str = r"SELECT id, user_id, title, notes,
       difficulty::TEXT as difficulty, completed, due_date, created_at
  FROM todos";

impl TodoStore {
    /// Insert a new to-do row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert(conn: &mut PgConnection, todo: &Todo) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO todos (id, user_id, title, notes, difficulty, completed, due_date, created_at)
              VALUES ($1, $2, $3, $4, $5::difficulty, $6, $7, $8)",
        )
        .bind(todo.id.into_inner())
        .bind(todo.user_id.into_inner())
        .bind(&todo.title)
        .bind(&todo.notes)
        .bind(difficulty_to_db(todo.difficulty))
        .bind(todo.completed)
        .bind(todo.due_date)
        .bind(todo.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a to-do by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch(conn: &mut PgConnection, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query_as::<_, TodoRow>(&format!("{SELECT_TODO} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        row.map(TodoRow::into_domain).transpose()
    }

    /// List all to-dos owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "{SELECT_TODO} WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(TodoRow::into_domain).collect()
    }

    /// Update a to-do's editable metadata.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn update_meta(
        conn: &mut PgConnection,
        id: TodoId,
        title: &str,
        notes: Option<&str>,
        difficulty: Difficulty,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE todos
                 SET title = $2, notes = $3, difficulty = $4::difficulty, due_date = $5
               WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(title)
        .bind(notes)
        .bind(difficulty_to_db(difficulty))
        .bind(due_date)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Set the terminal completed flag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn mark_completed(conn: &mut PgConnection, id: TodoId) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE todos SET completed = TRUE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete a to-do.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete(conn: &mut PgConnection, id: TodoId) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM todos WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
