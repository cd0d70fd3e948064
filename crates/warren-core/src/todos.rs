//! To-do operations: CRUD and terminal completion.

use chrono::{DateTime, Utc};

use warren_db::{PetStore, TodoStore};
use warren_pet::stats;
use warren_tasks::todo::plan_completion;
use warren_types::{Currency, Difficulty, PetStat, Todo, TodoId, UserId};

use crate::engine::Engine;
use crate::error::EngineError;

/// Input for creating a to-do.
#[derive(Debug, Clone)]
pub struct NewTodo {
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Reward tier.
    pub difficulty: Difficulty,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for updating a to-do's metadata.
#[derive(Debug, Clone)]
pub struct TodoUpdate {
    /// New title.
    pub title: String,
    /// New notes.
    pub notes: Option<String>,
    /// New tier.
    pub difficulty: Difficulty,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// The result of completing a to-do.
#[derive(Debug, Clone)]
pub struct TodoOutcome {
    /// The to-do after completion.
    pub todo: Todo,
    /// Human-readable confirmation.
    pub message: String,
    /// The gold granted.
    pub gold_change: i64,
}

impl Engine {
    /// Create a to-do.
    pub async fn create_todo(&self, user_id: UserId, input: NewTodo) -> Result<Todo, EngineError> {
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_user(&mut tx, user_id).await?;

        let todo = Todo {
            id: TodoId::new(),
            user_id,
            title: input.title,
            notes: input.notes,
            difficulty: input.difficulty,
            completed: false,
            due_date: input.due_date,
            created_at: self.clock().now(),
        };
        TodoStore::insert(&mut tx, &todo).await?;
        tx.commit().await?;
        Ok(todo)
    }

    /// Fetch a to-do the caller owns.
    pub async fn get_todo(&self, todo_id: TodoId, user_id: UserId) -> Result<Todo, EngineError> {
        let mut tx = self.pool().begin().await?;
        let todo = Self::require_owned_todo(&mut tx, todo_id, user_id).await?;
        tx.commit().await?;
        Ok(todo)
    }

    /// List the caller's to-dos, newest first.
    pub async fn list_todos(&self, user_id: UserId) -> Result<Vec<Todo>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let todos = TodoStore::list_for_user(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(todos)
    }

    /// Update a to-do's metadata.
    pub async fn update_todo(
        &self,
        todo_id: TodoId,
        user_id: UserId,
        input: TodoUpdate,
    ) -> Result<Todo, EngineError> {
        let mut tx = self.pool().begin().await?;
        let todo = Self::require_owned_todo(&mut tx, todo_id, user_id).await?;

        TodoStore::update_meta(
            &mut tx,
            todo_id,
            &input.title,
            input.notes.as_deref(),
            input.difficulty,
            input.due_date,
        )
        .await?;
        tx.commit().await?;

        Ok(Todo {
            title: input.title,
            notes: input.notes,
            difficulty: input.difficulty,
            due_date: input.due_date,
            ..todo
        })
    }

    /// Delete a to-do.
    pub async fn delete_todo(&self, todo_id: TodoId, user_id: UserId) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_owned_todo(&mut tx, todo_id, user_id).await?;
        TodoStore::delete(&mut tx, todo_id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Complete a to-do.
    ///
    /// Conflict when already completed (the flag is terminal). Grants
    /// gold by the to-do table and pet happiness, and flips the flag --
    /// one transaction.
    pub async fn complete_todo(
        &self,
        todo_id: TodoId,
        user_id: UserId,
    ) -> Result<TodoOutcome, EngineError> {
        let mut tx = self.pool().begin().await?;

        let todo = Self::require_owned_todo(&mut tx, todo_id, user_id).await?;
        let plan = plan_completion(&todo)?;

        let user = Self::require_user(&mut tx, user_id).await?;
        self.credit(
            &mut tx,
            &user,
            Currency::Gold,
            plan.gold,
            "TODO_REWARD",
            Some(todo_id.into_inner()),
        )
        .await?;

        let mut pet = Self::require_pet(&mut tx, user_id).await?;
        stats::apply_raise(&mut pet, PetStat::Happiness, plan.happiness);
        PetStore::update_stats(&mut tx, &pet).await?;

        TodoStore::mark_completed(&mut tx, todo_id).await?;
        tx.commit().await?;

        tracing::info!(todo = %todo_id, user = %user_id, gold = plan.gold, "To-do completed");

        Ok(TodoOutcome {
            todo: Todo {
                completed: true,
                ..todo
            },
            message: "To-do completed!".to_owned(),
            gold_change: plan.gold,
        })
    }

    /// Load a to-do and verify the caller owns it.
    pub(crate) async fn require_owned_todo(
        conn: &mut sqlx::PgConnection,
        todo_id: TodoId,
        user_id: UserId,
    ) -> Result<Todo, EngineError> {
        let todo = TodoStore::fetch(conn, todo_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("To-do \"{todo_id}\" not found.")))?;
        if todo.user_id != user_id {
            return Err(EngineError::Forbidden(
                "You do not have permission to access this to-do.".to_owned(),
            ));
        }
        Ok(todo)
    }
}
