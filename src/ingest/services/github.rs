//! GitHub issue import: file a task carrying the issue as its source.

use crate::ingest::domain::GithubIssueImport;
use crate::task::{
    domain::{GithubLink, Task, TaskDomainError, TaskSource, TaskType},
    ports::{CounterAllocator, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleError, TaskService},
};
use crate::workspace::{
    domain::{ProjectId, RepositoryId, WorkspaceId},
    ports::WorkspaceRepository,
};
use mockable::Clock;
use thiserror::Error;

/// Service-level errors for GitHub imports.
#[derive(Debug, Error)]
pub enum GithubImportError {
    /// Issue linkage validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task creation failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

/// Result type for GitHub imports.
pub type GithubImportResult<T> = Result<T, GithubImportError>;

/// Imports GitHub issues as tasks.
#[derive(Clone)]
pub struct GithubImportService<R, A, W, C>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskService<R, A, W, C>,
}

impl<R, A, W, C> GithubImportService<R, A, W, C>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new import service.
    #[must_use]
    pub const fn new(tasks: TaskService<R, A, W, C>) -> Self {
        Self { tasks }
    }

    /// Imports one issue as a backlog task.
    ///
    /// The task records the issue as its source and carries a back-link to
    /// it, so a later dispatch does not open a second issue.
    ///
    /// # Errors
    ///
    /// Returns [`GithubImportError`] when validation or task creation fails.
    pub async fn import(
        &self,
        workspace_id: WorkspaceId,
        project_id: Option<ProjectId>,
        repository_id: Option<RepositoryId>,
        import: GithubIssueImport,
    ) -> GithubImportResult<Task> {
        let link = GithubLink::new(import.issue_number(), import.url())?;
        let mut request = CreateTaskRequest::new(workspace_id, import.title())
            .with_source(TaskSource::Github {
                issue_number: import.issue_number(),
                url: import.url().to_owned(),
            })
            .with_task_type(TaskType::Task);
        if let Some(project_id) = project_id {
            request = request.with_project(project_id);
        }
        if let Some(repository_id) = repository_id {
            request = request.with_repository(repository_id);
        }
        if let Some(description) = import.description() {
            request = request.with_description(description);
        }
        for label in import.labels() {
            request = request.with_label(label.clone());
        }
        let task = self.tasks.create(request).await?;
        Ok(self.tasks.link_github(task.id(), link).await?)
    }
}
