//! Task lifecycle orchestration: creation with identity allocation, status
//! moves, and the audit trail.

use crate::board::services::{BoardFeed, BoardSubscription, TaskChange, TaskChangeKind};
use crate::task::{
    domain::{
        ActivityEntry, ActivityType, AgentExecution, Attachment, CodeContext, DisplayId,
        ExtractionMetadata, GithubLink, Task, TaskContent, TaskDomainError, TaskFilter, TaskId,
        TaskIdentity, TaskPriority, TaskSource, TaskStatus, TaskTitle, TaskType,
    },
    ports::{
        CounterAllocator, CounterError, CounterScope, CounterType, TaskRepository,
        TaskRepositoryError,
    },
};
use crate::workspace::{
    domain::{ProjectId, RepositoryId, ShortCode, WorkspaceDomainError, WorkspaceId},
    ports::{WorkspaceRepository, WorkspaceRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Task domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Workspace domain validation failed, including cross-tenant project use.
    #[error(transparent)]
    WorkspaceDomain(#[from] WorkspaceDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Counter allocation failed.
    #[error(transparent)]
    Counter(#[from] CounterError),
    /// Workspace lookup failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceRepositoryError),
}

/// Result type for task lifecycle operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Request to create a task.
///
/// Only the workspace and title are required; everything else defaults the
/// same way a manually filed task would.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    workspace_id: WorkspaceId,
    project_id: Option<ProjectId>,
    repository_id: Option<RepositoryId>,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    task_type: TaskType,
    source: TaskSource,
    assignee: Option<String>,
    labels: Vec<String>,
    code_context: Option<CodeContext>,
    attachments: Vec<Attachment>,
    extraction: Option<ExtractionMetadata>,
}

impl CreateTaskRequest {
    /// Creates a request with defaults: backlog status, medium priority,
    /// `task` type, manual source.
    #[must_use]
    pub fn new(workspace_id: WorkspaceId, title: impl Into<String>) -> Self {
        Self {
            workspace_id,
            project_id: None,
            repository_id: None,
            title: title.into(),
            description: None,
            status: TaskStatus::Backlog,
            priority: TaskPriority::Medium,
            task_type: TaskType::Task,
            source: TaskSource::Manual,
            assignee: None,
            labels: Vec::new(),
            code_context: None,
            attachments: Vec::new(),
            extraction: None,
        }
    }

    /// Assigns the task to a project, switching identity to the project
    /// counter scope and short code.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Connects the task to a source repository.
    #[must_use]
    pub const fn with_repository(mut self, repository_id: RepositoryId) -> Self {
        self.repository_id = Some(repository_id);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the work classification.
    #[must_use]
    pub const fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Sets the provenance record.
    #[must_use]
    pub fn with_source(mut self, source: TaskSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Sets the code context.
    #[must_use]
    pub fn with_code_context(mut self, context: CodeContext) -> Self {
        self.code_context = Some(context);
        self
    }

    /// Adds an attachment reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Sets the AI-extraction metadata.
    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionMetadata) -> Self {
        self.extraction = Some(extraction);
        self
    }
}

/// Task lifecycle orchestration service.
pub struct TaskService<R, A, W, C>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    counters: Arc<A>,
    workspaces: Arc<W>,
    clock: Arc<C>,
    feed: BoardFeed,
}

impl<R, A, W, C> Clone for TaskService<R, A, W, C>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            counters: Arc::clone(&self.counters),
            workspaces: Arc::clone(&self.workspaces),
            clock: Arc::clone(&self.clock),
            feed: self.feed.clone(),
        }
    }
}

impl<R, A, W, C> TaskService<R, A, W, C>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service publishing changes into the given feed.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        counters: Arc<A>,
        workspaces: Arc<W>,
        clock: Arc<C>,
        feed: BoardFeed,
    ) -> Self {
        Self {
            repository,
            counters,
            workspaces,
            clock,
            feed,
        }
    }

    /// Returns the change feed this service publishes into.
    #[must_use]
    pub const fn feed(&self) -> &BoardFeed {
        &self.feed
    }

    /// Opens a subscription on the change feed.
    #[must_use]
    pub fn subscribe(&self, filter: TaskFilter) -> BoardSubscription {
        self.feed.subscribe(filter)
    }

    /// Creates a task, allocating its number and display ID.
    ///
    /// The counter scope is the project when the request names one and the
    /// workspace otherwise; the display ID carries that scope's short code.
    /// The creation is recorded in the activity log and announced on the
    /// feed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the workspace or project does not
    /// exist, the project belongs to another workspace, validation fails, or
    /// persistence rejects the task.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let (scope, short_code) = self
            .identity_scope(request.workspace_id, request.project_id)
            .await?;
        let task_number = self
            .counters
            .allocate_next(scope, CounterType::TaskNumber)
            .await?;
        let identity = TaskIdentity {
            workspace_id: request.workspace_id,
            project_id: request.project_id,
            repository_id: request.repository_id,
            task_number,
            display_id: DisplayId::derive(&short_code, task_number),
        };
        let content = TaskContent {
            title,
            description: request.description,
            priority: request.priority,
            task_type: request.task_type,
            source: request.source,
            assignee: request.assignee,
            labels: request.labels,
            code_context: request.code_context,
            attachments: request.attachments,
            extraction: request.extraction,
        };
        let task = Task::new(identity, content, request.status, &*self.clock);
        self.repository.store(&task).await?;
        self.repository
            .append_activity(&task.creation_activity(&*self.clock))
            .await?;
        self.publish(&task, TaskChangeKind::Created);
        Ok(task)
    }

    /// Overwrites a task's status. Any status may replace any other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let change = task.set_status(status, &*self.clock);
        self.repository.update(&task).await?;
        self.repository
            .append_activity(&ActivityEntry::record(
                task_id,
                ActivityType::StatusChanged,
                Some(change.from.as_str().to_owned()),
                Some(change.to.as_str().to_owned()),
                &*self.clock,
            ))
            .await?;
        self.publish(
            &task,
            TaskChangeKind::StatusChanged {
                from: change.from,
                to: change.to,
            },
        );
        Ok(task)
    }

    /// Overwrites a task's priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn update_priority(
        &self,
        task_id: TaskId,
        priority: TaskPriority,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let previous = task.set_priority(priority, &*self.clock);
        self.repository.update(&task).await?;
        self.repository
            .append_activity(&ActivityEntry::record(
                task_id,
                ActivityType::PriorityChanged,
                Some(previous.as_str().to_owned()),
                Some(priority.as_str().to_owned()),
                &*self.clock,
            ))
            .await?;
        self.publish(
            &task,
            TaskChangeKind::PriorityChanged {
                from: previous,
                to: priority,
            },
        );
        Ok(task)
    }

    /// Assigns or clears a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn assign(
        &self,
        task_id: TaskId,
        assignee: Option<String>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let previous = task.assign(assignee.clone(), &*self.clock);
        self.repository.update(&task).await?;
        self.repository
            .append_activity(&ActivityEntry::record(
                task_id,
                ActivityType::AssigneeChanged,
                previous,
                assignee,
                &*self.clock,
            ))
            .await?;
        self.publish(&task, TaskChangeKind::AssigneeChanged);
        Ok(task)
    }

    /// Replaces a task's title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty and
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn rename(
        &self,
        task_id: TaskId,
        title: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(title)?;
        let mut task = self.load(task_id).await?;
        task.set_title(title, &*self.clock);
        self.repository.update(&task).await?;
        self.publish(&task, TaskChangeKind::ContentChanged);
        Ok(task)
    }

    /// Replaces a task's description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn update_description(
        &self,
        task_id: TaskId,
        description: Option<String>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        task.set_description(description, &*self.clock);
        self.repository.update(&task).await?;
        self.publish(&task, TaskChangeKind::ContentChanged);
        Ok(task)
    }

    /// Adds a label to a task unless already present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn add_label(
        &self,
        task_id: TaskId,
        label: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        task.add_label(label, &*self.clock);
        self.repository.update(&task).await?;
        self.publish(&task, TaskChangeKind::ContentChanged);
        Ok(task)
    }

    /// Appends an attachment reference to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn attach(
        &self,
        task_id: TaskId,
        attachment: Attachment,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        task.attach(attachment, &*self.clock);
        self.repository.update(&task).await?;
        self.publish(&task, TaskChangeKind::ContentChanged);
        Ok(task)
    }

    /// Records a GitHub linkage on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn link_github(
        &self,
        task_id: TaskId,
        link: GithubLink,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        task.link_github(link, &*self.clock);
        self.repository.update(&task).await?;
        self.publish(&task, TaskChangeKind::ContentChanged);
        Ok(task)
    }

    /// Replaces a task's agent execution state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn record_agent_execution(
        &self,
        task_id: TaskId,
        execution: AgentExecution,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        task.set_agent_execution(execution, &*self.clock);
        self.repository.update(&task).await?;
        self.publish(&task, TaskChangeKind::ContentChanged);
        Ok(task)
    }

    /// Finds a task by internal identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    pub async fn find(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.load(task_id).await
    }

    /// Finds a task by display ID. Returns `None` when no task carries it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_display_id(
        &self,
        display_id: &DisplayId,
    ) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_display_id(display_id).await?)
    }

    /// Lists tasks matching a filter, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list(&self, filter: &TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Returns the activity log for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn activity(&self, task_id: TaskId) -> TaskLifecycleResult<Vec<ActivityEntry>> {
        Ok(self.repository.activity_for_task(task_id).await?)
    }

    async fn load(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        Ok(self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(task_id))?)
    }

    /// Resolves the counter scope and short code for a creation request.
    ///
    /// The project wins over the workspace when the request names one, after
    /// confirming it actually belongs to the workspace.
    async fn identity_scope(
        &self,
        workspace_id: WorkspaceId,
        project_id: Option<ProjectId>,
    ) -> TaskLifecycleResult<(CounterScope, ShortCode)> {
        let workspace = self
            .workspaces
            .find_workspace(workspace_id)
            .await?
            .ok_or(WorkspaceRepositoryError::WorkspaceNotFound(workspace_id))?;
        if let Some(project_id) = project_id {
            let project = self
                .workspaces
                .find_project(project_id)
                .await?
                .ok_or(WorkspaceRepositoryError::ProjectNotFound(project_id))?;
            project.ensure_in_workspace(workspace_id)?;
            return Ok((
                CounterScope::Project(project_id),
                project.short_code().clone(),
            ));
        }
        Ok((
            CounterScope::Workspace(workspace_id),
            workspace.short_code().clone(),
        ))
    }

    fn publish(&self, task: &Task, kind: TaskChangeKind) {
        let _subscribers = self.feed.publish(TaskChange {
            workspace_id: task.workspace_id(),
            project_id: task.project_id(),
            repository_id: task.repository_id(),
            task_id: task.id(),
            kind,
        });
    }
}
