//! Dispatch of authenticated external API actions.

use crate::api::domain::TaskAction;
use crate::board::domain::Board;
use crate::task::{
    domain::{DisplayId, Task, TaskDomainError, TaskFilter, TaskSource},
    ports::{CounterAllocator, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleError, TaskService},
};
use crate::workspace::{
    domain::ProjectId,
    ports::{ApiKeyRepository, WorkspaceRepository, WorkspaceRepositoryError},
    services::{ApiKeyError, ApiKeyService},
};
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced to API callers.
///
/// Every failure, including authentication, renders as the same JSON shape:
/// an object with a single `error` string. Callers branch on the presence of
/// `error`, never on transport status.
#[derive(Debug, Error)]
pub enum ApiDispatchError {
    /// The presented API key matched no active key.
    #[error("invalid api key")]
    Unauthorized,
    /// The request payload did not parse as an action.
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The named task does not exist in the key's project.
    #[error("unknown task: {0}")]
    UnknownTask(DisplayId),
    /// Display-ID validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task operation failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
    /// Key lookup failed.
    #[error(transparent)]
    Keys(#[from] ApiKeyError),
    /// Project lookup failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceRepositoryError),
}

/// External API dispatcher.
///
/// Authenticates the presented key, scopes the action to the key's project,
/// and executes it.
#[derive(Clone)]
pub struct ApiDispatchService<R, A, W, C, K>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
    K: ApiKeyRepository,
{
    tasks: TaskService<R, A, W, C>,
    keys: ApiKeyService<K, W, C>,
    workspaces: Arc<W>,
}

impl<R, A, W, C, K> ApiDispatchService<R, A, W, C, K>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
    K: ApiKeyRepository,
{
    /// Creates a new dispatcher.
    #[must_use]
    pub const fn new(
        tasks: TaskService<R, A, W, C>,
        keys: ApiKeyService<K, W, C>,
        workspaces: Arc<W>,
    ) -> Self {
        Self {
            tasks,
            keys,
            workspaces,
        }
    }

    /// Executes one request and renders the response.
    ///
    /// Always returns a JSON value: the action result on success, or an
    /// object carrying a single `error` string on any failure.
    pub async fn dispatch(&self, presented_key: &str, payload: Value) -> Value {
        match self.execute(presented_key, payload).await {
            Ok(value) => value,
            Err(err) => json!({ "error": err.to_string() }),
        }
    }

    async fn execute(
        &self,
        presented_key: &str,
        payload: Value,
    ) -> Result<Value, ApiDispatchError> {
        let scope = self.authenticate(presented_key).await?;
        let action: TaskAction = serde_json::from_value(payload)?;
        match action {
            TaskAction::List => self.list(&scope).await,
            TaskAction::Create {
                title,
                description,
                priority,
                task_type,
                labels,
            } => {
                let mut request = CreateTaskRequest::new(scope.workspace_filter.workspace_id, title)
                    .with_project(scope.project_id)
                    .with_source(TaskSource::Api);
                if let Some(description) = description {
                    request = request.with_description(description);
                }
                if let Some(priority) = priority {
                    request = request.with_priority(priority);
                }
                if let Some(task_type) = task_type {
                    request = request.with_task_type(task_type);
                }
                for label in labels {
                    request = request.with_label(label);
                }
                let task = self.tasks.create(request).await?;
                render_task(&task)
            }
            TaskAction::Update {
                display_id,
                title,
                description,
                priority,
                assignee,
            } => {
                let task = self.find_in_scope(&scope, &display_id).await?;
                let task_id = task.id();
                let mut updated = task;
                if let Some(title) = title {
                    updated = self.tasks.rename(task_id, title).await?;
                }
                if description.is_some() {
                    updated = self.tasks.update_description(task_id, description).await?;
                }
                if let Some(priority) = priority {
                    updated = self.tasks.update_priority(task_id, priority).await?;
                }
                if let Some(assignee) = assignee {
                    let assignee = (!assignee.is_empty()).then_some(assignee);
                    updated = self.tasks.assign(task_id, assignee).await?;
                }
                render_task(&updated)
            }
            TaskAction::Status { display_id, status } => {
                let task = self.find_in_scope(&scope, &display_id).await?;
                let moved = self.tasks.update_status(task.id(), status).await?;
                render_task(&moved)
            }
        }
    }

    async fn authenticate(&self, presented_key: &str) -> Result<KeyScope, ApiDispatchError> {
        let key = self
            .keys
            .authenticate(presented_key)
            .await?
            .ok_or(ApiDispatchError::Unauthorized)?;
        let project_id = key.project_id();
        let project = self
            .workspaces
            .find_project(project_id)
            .await
            .map_err(ApiDispatchError::Workspace)?
            .ok_or(WorkspaceRepositoryError::ProjectNotFound(project_id))?;
        Ok(KeyScope {
            project_id,
            workspace_filter: TaskFilter::workspace(project.workspace_id())
                .with_project(project_id),
        })
    }

    async fn list(&self, scope: &KeyScope) -> Result<Value, ApiDispatchError> {
        let tasks = self.tasks.list(&scope.workspace_filter).await?;
        let board = Board::project(tasks);
        Ok(serde_json::to_value(board)?)
    }

    async fn find_in_scope(
        &self,
        scope: &KeyScope,
        display_id: &str,
    ) -> Result<Task, ApiDispatchError> {
        let display_id = DisplayId::try_from(display_id)?;
        let task = self
            .tasks
            .find_by_display_id(&display_id)
            .await?
            .filter(|task| task.project_id() == Some(scope.project_id))
            .ok_or(ApiDispatchError::UnknownTask(display_id))?;
        Ok(task)
    }
}

/// Scope resolved from an authenticated key: its project and the matching
/// task filter.
struct KeyScope {
    project_id: ProjectId,
    workspace_filter: TaskFilter,
}

fn render_task(task: &Task) -> Result<Value, ApiDispatchError> {
    Ok(json!({ "task": serde_json::to_value(task)? }))
}
