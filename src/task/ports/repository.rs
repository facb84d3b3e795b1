//! Repository port for task persistence, lookup, and activity logging.

use crate::task::domain::{ActivityEntry, DisplayId, Task, TaskFilter, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists or [`TaskRepositoryError::DuplicateDisplayId`] when the
    /// display ID is already assigned.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by internal identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by display ID.
    ///
    /// Returns `None` when no task carries the display ID.
    async fn find_by_display_id(
        &self,
        display_id: &DisplayId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks matching a filter, in creation order.
    ///
    /// Cancelled tasks are included; projections decide what to exclude.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Appends an activity-log entry. Entries are immutable once written.
    async fn append_activity(&self, entry: &ActivityEntry) -> TaskRepositoryResult<()>;

    /// Returns the activity log for a task, oldest first.
    async fn activity_for_task(&self, task_id: TaskId)
    -> TaskRepositoryResult<Vec<ActivityEntry>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A task with the same display ID already exists.
    #[error("duplicate display id: {0}")]
    DuplicateDisplayId(DisplayId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
