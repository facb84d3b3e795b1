//! Service assembling board snapshots from the task store.

use crate::board::domain::Board;
use crate::task::{
    domain::TaskFilter,
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for board queries.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for board queries.
pub type KanbanResult<T> = Result<T, KanbanError>;

/// Read-side service projecting stored tasks onto kanban boards.
#[derive(Clone)]
pub struct KanbanService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> KanbanService<R>
where
    R: TaskRepository,
{
    /// Creates a new kanban service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Builds a board snapshot for the tasks matching a filter.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Repository`] when the task listing fails.
    pub async fn board(&self, filter: &TaskFilter) -> KanbanResult<Board> {
        let tasks = self.repository.list(filter).await?;
        Ok(Board::project(tasks))
    }
}
