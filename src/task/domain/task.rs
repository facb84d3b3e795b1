//! Task aggregate root.

use super::{
    ActivityEntry, ActivityType, AgentExecution, Attachment, CodeContext, DisplayId,
    ExtractionMetadata, GithubLink, TaskId, TaskNumber, TaskPriority, TaskSource, TaskStatus,
    TaskTitle, TaskType,
};
use crate::workspace::domain::{ProjectId, RepositoryId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Identity assigned to a task at creation time.
///
/// The task number comes from the counter scope (project when set, workspace
/// otherwise) and the display ID from that scope's short code. Both are
/// immutable for the life of the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIdentity {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Project the task belongs to, if any.
    pub project_id: Option<ProjectId>,
    /// Connected source repository, if any.
    pub repository_id: Option<RepositoryId>,
    /// Sequential number within the counter scope.
    pub task_number: TaskNumber,
    /// Derived human-readable identifier.
    pub display_id: DisplayId,
}

/// Caller-supplied task content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContent {
    /// Validated task title.
    pub title: TaskTitle,
    /// Free-form description.
    pub description: Option<String>,
    /// Task priority.
    pub priority: TaskPriority,
    /// Work classification.
    pub task_type: TaskType,
    /// Provenance of the task.
    pub source: TaskSource,
    /// Assigned user, if any.
    pub assignee: Option<String>,
    /// Free-form labels.
    pub labels: Vec<String>,
    /// Code locations and evidence, if any.
    pub code_context: Option<CodeContext>,
    /// Uploaded file references.
    pub attachments: Vec<Attachment>,
    /// AI-extraction metadata, when the task was extracted from a message.
    pub extraction: Option<ExtractionMetadata>,
}

impl TaskContent {
    /// Creates content with defaults: medium priority, `task` type, manual
    /// source, nothing optional set.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
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
}

/// Result of a status overwrite, for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the overwrite.
    pub from: TaskStatus,
    /// Status after the overwrite.
    pub to: TaskStatus,
}

/// Filter describing which tasks a board query or feed subscription covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilter {
    /// Workspace whose tasks are selected.
    pub workspace_id: WorkspaceId,
    /// Narrow to one connected repository.
    pub repository_id: Option<RepositoryId>,
    /// Narrow to one project.
    pub project_id: Option<ProjectId>,
}

impl TaskFilter {
    /// Creates a workspace-wide filter.
    #[must_use]
    pub const fn workspace(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            repository_id: None,
            project_id: None,
        }
    }

    /// Narrows the filter to one repository.
    #[must_use]
    pub const fn with_repository(mut self, repository_id: RepositoryId) -> Self {
        self.repository_id = Some(repository_id);
        self
    }

    /// Narrows the filter to one project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Returns whether a task with the given coordinates matches.
    #[must_use]
    pub fn matches(
        &self,
        workspace_id: WorkspaceId,
        repository_id: Option<RepositoryId>,
        project_id: Option<ProjectId>,
    ) -> bool {
        self.workspace_id == workspace_id
            && self
                .repository_id
                .is_none_or(|wanted| repository_id == Some(wanted))
            && self
                .project_id
                .is_none_or(|wanted| project_id == Some(wanted))
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    workspace_id: WorkspaceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository_id: Option<RepositoryId>,
    task_number: TaskNumber,
    display_id: DisplayId,
    title: TaskTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    task_type: TaskType,
    source: TaskSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code_context: Option<CodeContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction: Option<ExtractionMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_execution: Option<AgentExecution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    github_link: Option<GithubLink>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted identity fields.
    pub identity: TaskIdentity,
    /// Persisted content fields.
    pub content: TaskContent,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted agent execution state, if any.
    pub agent_execution: Option<AgentExecution>,
    /// Persisted GitHub linkage, if any.
    pub github_link: Option<GithubLink>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, set only while status is done.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task with an allocated identity.
    #[must_use]
    pub fn new(
        identity: TaskIdentity,
        content: TaskContent,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let completed_at = (status == TaskStatus::Done).then_some(timestamp);
        Self {
            id: TaskId::new(),
            workspace_id: identity.workspace_id,
            project_id: identity.project_id,
            repository_id: identity.repository_id,
            task_number: identity.task_number,
            display_id: identity.display_id,
            title: content.title,
            description: content.description,
            status,
            priority: content.priority,
            task_type: content.task_type,
            source: content.source,
            assignee: content.assignee,
            labels: content.labels,
            code_context: content.code_context,
            attachments: content.attachments,
            extraction: content.extraction,
            agent_execution: None,
            github_link: None,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.identity.workspace_id,
            project_id: data.identity.project_id,
            repository_id: data.identity.repository_id,
            task_number: data.identity.task_number,
            display_id: data.identity.display_id,
            title: data.content.title,
            description: data.content.description,
            status: data.status,
            priority: data.content.priority,
            task_type: data.content.task_type,
            source: data.content.source,
            assignee: data.content.assignee,
            labels: data.content.labels,
            code_context: data.content.code_context,
            attachments: data.content.attachments,
            extraction: data.content.extraction,
            agent_execution: data.agent_execution,
            github_link: data.github_link,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the project the task belongs to, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the connected repository, if any.
    #[must_use]
    pub const fn repository_id(&self) -> Option<RepositoryId> {
        self.repository_id
    }

    /// Returns the sequential task number.
    #[must_use]
    pub const fn task_number(&self) -> TaskNumber {
        self.task_number
    }

    /// Returns the human-readable display ID.
    #[must_use]
    pub const fn display_id(&self) -> &DisplayId {
        &self.display_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the kanban status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the work classification.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the provenance record.
    #[must_use]
    pub const fn source(&self) -> &TaskSource {
        &self.source
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the code context, if any.
    #[must_use]
    pub const fn code_context(&self) -> Option<&CodeContext> {
        self.code_context.as_ref()
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the AI-extraction metadata, if any.
    #[must_use]
    pub const fn extraction(&self) -> Option<&ExtractionMetadata> {
        self.extraction.as_ref()
    }

    /// Returns the agent execution state, if any.
    #[must_use]
    pub const fn agent_execution(&self) -> Option<&AgentExecution> {
        self.agent_execution.as_ref()
    }

    /// Returns the GitHub linkage, if any.
    #[must_use]
    pub const fn github_link(&self) -> Option<&GithubLink> {
        self.github_link.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, set only while the status is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns whether the task matches a board filter.
    #[must_use]
    pub fn matches(&self, filter: &TaskFilter) -> bool {
        filter.matches(self.workspace_id, self.repository_id, self.project_id)
    }

    /// Overwrites the status.
    ///
    /// Any status may replace any other. Entering `done` stamps
    /// `completed_at`; every other target clears it.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) -> StatusChange {
        let change = StatusChange {
            from: self.status,
            to: status,
        };
        self.status = status;
        self.touch(clock);
        self.completed_at = (status == TaskStatus::Done).then_some(self.updated_at);
        change
    }

    /// Returns a copy of the task displayed under a different status.
    ///
    /// Unlike [`Task::set_status`] this does not advance `updated_at`; it is
    /// meant for overlaying a move the server has not persisted yet.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self.completed_at = (status == TaskStatus::Done).then_some(self.updated_at);
        self
    }

    /// Overwrites the priority, returning the previous value.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) -> TaskPriority {
        let previous = self.priority;
        self.priority = priority;
        self.touch(clock);
        previous
    }

    /// Assigns or clears the assignee, returning the previous value.
    pub fn assign(&mut self, assignee: Option<String>, clock: &impl Clock) -> Option<String> {
        let previous = self.assignee.take();
        self.assignee = assignee;
        self.touch(clock);
        previous
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Adds a label unless already present.
    pub fn add_label(&mut self, label: impl Into<String>, clock: &impl Clock) {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
            self.touch(clock);
        }
    }

    /// Appends an attachment reference.
    pub fn attach(&mut self, attachment: Attachment, clock: &impl Clock) {
        self.attachments.push(attachment);
        self.touch(clock);
    }

    /// Replaces the agent execution state.
    pub fn set_agent_execution(&mut self, execution: AgentExecution, clock: &impl Clock) {
        self.agent_execution = Some(execution);
        self.touch(clock);
    }

    /// Records a GitHub linkage.
    pub fn link_github(&mut self, link: GithubLink, clock: &impl Clock) {
        self.github_link = Some(link);
        self.touch(clock);
    }

    /// Builds the creation audit entry for this task.
    #[must_use]
    pub fn creation_activity(&self, clock: &impl Clock) -> ActivityEntry {
        ActivityEntry::record(
            self.id,
            ActivityType::Created,
            None,
            Some(self.status.as_str().to_owned()),
            clock,
        )
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
