//! Slack ingestion: claim the event, then file the extracted tasks.

use crate::ingest::{
    domain::{ExtractedTask, SlackMessage},
    ports::{ProcessedEventError, ProcessedEventStore},
};
use crate::task::{
    domain::Task,
    ports::{CounterAllocator, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleError, TaskService},
};
use crate::workspace::{
    domain::{ProjectId, WorkspaceId},
    ports::WorkspaceRepository,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for Slack ingestion.
#[derive(Debug, Error)]
pub enum SlackIngestError {
    /// Deduplication claim failed.
    #[error(transparent)]
    Dedup(#[from] ProcessedEventError),
    /// Task creation failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

/// Result type for Slack ingestion.
pub type SlackIngestResult<T> = Result<T, SlackIngestError>;

/// Ingests extracted task candidates from Slack events.
///
/// Each event is claimed exactly once per workspace; a redelivered event
/// produces no tasks, no activity, and no feed changes.
#[derive(Clone)]
pub struct SlackIngestService<R, A, W, C, E>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
    E: ProcessedEventStore,
{
    tasks: TaskService<R, A, W, C>,
    events: Arc<E>,
}

impl<R, A, W, C, E> SlackIngestService<R, A, W, C, E>
where
    R: TaskRepository,
    A: CounterAllocator,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
    E: ProcessedEventStore,
{
    /// Creates a new Slack ingestion service.
    #[must_use]
    pub const fn new(tasks: TaskService<R, A, W, C>, events: Arc<E>) -> Self {
        Self { tasks, events }
    }

    /// Files the extracted candidates for one Slack event.
    ///
    /// Returns `Ok(None)` when the event was already claimed, otherwise the
    /// tasks created, in candidate order. Candidates land in the backlog
    /// carrying the message as their source and the extraction metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SlackIngestError`] when the claim or any task creation
    /// fails. A failure after the claim leaves the event claimed; Slack's
    /// redelivery must not refile candidates that may already exist.
    pub async fn ingest(
        &self,
        workspace_id: WorkspaceId,
        project_id: Option<ProjectId>,
        message: &SlackMessage,
        candidates: Vec<ExtractedTask>,
    ) -> SlackIngestResult<Option<Vec<Task>>> {
        if !self.events.claim(workspace_id, message.event_ts()).await? {
            return Ok(None);
        }
        let mut created = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let mut request = CreateTaskRequest::new(workspace_id, candidate.title)
                .with_source(message.to_source())
                .with_priority(candidate.priority)
                .with_task_type(candidate.task_type)
                .with_extraction(candidate.extraction);
            if let Some(project_id) = project_id {
                request = request.with_project(project_id);
            }
            if let Some(description) = candidate.description {
                request = request.with_description(description);
            }
            for label in candidate.labels {
                request = request.with_label(label);
            }
            if let Some(context) = candidate.code_context {
                request = request.with_code_context(context);
            }
            created.push(self.tasks.create(request).await?);
        }
        Ok(Some(created))
    }
}
