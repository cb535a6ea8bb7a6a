use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// A to-do item owned by a single user.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    /// Identifier of the owning user. Every per-task operation checks
    /// this against the caller's identity.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Ownership check shared by every per-task handler. Must run after
    /// the task has been loaded and before it is returned or mutated.
    ///
    /// A mismatch is `Forbidden`, never `NotFound`: the task exists, the
    /// caller just may not act on it.
    pub fn ensure_owned_by(&self, user_id: i64) -> Result<(), AppError> {
        if self.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not have permission to access this task".into(),
            ));
        }
        Ok(())
    }
}

/// Payload for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// Partial task update. Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PATCH /tasks/{id}/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStatus {
    pub completed: bool,
}
