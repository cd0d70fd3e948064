//! To-do completion planning.
//!
//! Completion is terminal: once a to-do's flag is set it stays set until
//! the row is deleted, and a second completion is a conflict. Rewards use
//! the to-do table (below the habit table at every tier).

use serde::{Deserialize, Serialize};

use warren_types::Todo;

use crate::difficulty::{todo_reward_points, HAPPINESS_PER_COMPLETION};
use crate::error::TaskError;

/// The planned effect of completing a to-do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoCompletion {
    /// Gold to credit the user.
    pub gold: i64,
    /// Happiness to grant the pet.
    pub happiness: i32,
}

/// Plan the completion of `todo`.
///
/// # Errors
///
/// Returns [`TaskError::AlreadyCompleted`] when the terminal flag is set.
pub const fn plan_completion(todo: &Todo) -> Result<TodoCompletion, TaskError> {
    if todo.completed {
        return Err(TaskError::AlreadyCompleted);
    }
    Ok(TodoCompletion {
        gold: todo_reward_points(todo.difficulty),
        happiness: HAPPINESS_PER_COMPLETION,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use warren_types::{Difficulty, TodoId, UserId};

    fn todo(difficulty: Difficulty, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(),
            user_id: UserId::new(),
            title: "Buy groceries".to_owned(),
            notes: None,
            difficulty,
            completed,
            due_date: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn hard_todo_grants_sixteen_gold() {
        let plan = plan_completion(&todo(Difficulty::Hard, false)).unwrap();
        assert_eq!(plan.gold, 16);
        assert_eq!(plan.happiness, 5);
    }

    #[test]
    fn trivial_todo_grants_two_gold() {
        let plan = plan_completion(&todo(Difficulty::Trivial, false)).unwrap();
        assert_eq!(plan.gold, 2);
    }

    #[test]
    fn completed_todo_is_terminal() {
        let result = plan_completion(&todo(Difficulty::Easy, true));
        assert_eq!(result, Err(TaskError::AlreadyCompleted));
    }
}
