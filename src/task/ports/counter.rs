//! Counter allocator port: strictly increasing per-scope task numbers.

use crate::task::domain::{TaskDomainError, TaskNumber};
use crate::workspace::domain::{ProjectId, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Scope a counter row belongs to.
///
/// Project scope takes precedence over workspace scope when a task belongs
/// to a project; the two may coexist for the same workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterScope {
    /// Counter shared by all project-less tasks in a workspace.
    Workspace(WorkspaceId),
    /// Counter owned by a single project.
    Project(ProjectId),
}

impl CounterScope {
    /// Returns the UUID keying the counter row.
    #[must_use]
    pub const fn scope_uuid(self) -> Uuid {
        match self {
            Self::Workspace(id) => id.into_inner(),
            Self::Project(id) => id.into_inner(),
        }
    }
}

/// Kind of value a counter row hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterType {
    /// Sequential task numbers for display IDs.
    TaskNumber,
}

impl CounterType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskNumber => "task_number",
        }
    }
}

/// Result type for counter allocation.
pub type CounterResult<T> = Result<T, CounterError>;

/// Atomic allocate-next-integer contract.
///
/// Implementations must perform the read-modify-write as one atomic
/// operation against their store: either a fresh unique value is returned or
/// the call fails with no counter mutation. A missing counter row is
/// implicitly created at zero before incrementing, so the first allocation
/// returns 1.
#[async_trait]
pub trait CounterAllocator: Send + Sync {
    /// Allocates the next number for a scope.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError`] when the store rejects the increment; no
    /// partial state is left behind.
    async fn allocate_next(
        &self,
        scope: CounterScope,
        counter_type: CounterType,
    ) -> CounterResult<TaskNumber>;
}

/// Errors returned by counter allocator implementations.
#[derive(Debug, Clone, Error)]
pub enum CounterError {
    /// The incremented value fell outside the valid task-number range.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CounterError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
