//! Optional task substructures: code context, attachments, agent execution,
//! and GitHub linkage.

use super::TaskDomainError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code locations and evidence attached to a task.
///
/// Absent entirely when a task carries no code context; an empty structure is
/// never persisted in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    /// Source files the task refers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_paths: Vec<String>,
    /// Captured stack trace, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    /// Relevant code snippet, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// Opaque reference to an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Storage reference understood by the file store.
    pub file_ref: String,
    /// Original file name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Link back to a GitHub issue created from or dispatched for this task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubLink {
    issue_number: u64,
    url: String,
}

impl GithubLink {
    /// Creates a validated GitHub linkage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyIssueUrl`] when the URL is empty after
    /// trimming.
    pub fn new(issue_number: u64, url: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = url.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyIssueUrl);
        }
        Ok(Self {
            issue_number,
            url: normalized.to_owned(),
        })
    }

    /// Returns the linked issue number.
    #[must_use]
    pub const fn issue_number(&self) -> u64 {
        self.issue_number
    }

    /// Returns the linked issue URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Execution state of the external coding agent dispatched for a task.
///
/// Modeled as an asynchronous status field: the UI subscribes to changes
/// rather than awaiting completion inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentExecution {
    /// Dispatch requested; the agent has not picked the task up yet.
    Pending {
        /// When the dispatch was requested.
        requested_at: DateTime<Utc>,
    },
    /// The agent is working.
    Running {
        /// When the dispatch was requested.
        requested_at: DateTime<Utc>,
        /// When the agent started.
        started_at: DateTime<Utc>,
    },
    /// The agent finished successfully.
    Completed {
        /// When the agent started.
        started_at: DateTime<Utc>,
        /// When the agent finished.
        finished_at: DateTime<Utc>,
        /// Agent output summary, if reported.
        #[serde(skip_serializing_if = "Option::is_none")]
        output: Option<String>,
    },
    /// The agent failed.
    Failed {
        /// When the agent started.
        started_at: DateTime<Utc>,
        /// When the failure was recorded.
        finished_at: DateTime<Utc>,
        /// Failure description from the agent runtime.
        error: String,
    },
}

/// Error returned for invalid agent-execution transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid agent execution transition from '{from}'")]
pub struct AgentExecutionTransitionError {
    /// Status the execution was in when the transition was attempted.
    pub from: &'static str,
}

impl AgentExecution {
    /// Records a new dispatch request.
    #[must_use]
    pub fn request(clock: &impl Clock) -> Self {
        Self::Pending {
            requested_at: clock.utc(),
        }
    }

    /// Returns the canonical status label.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Pending { .. } => "pending",
            Self::Running { .. } => "running",
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
        }
    }

    /// Marks the execution as started.
    ///
    /// # Errors
    ///
    /// Returns [`AgentExecutionTransitionError`] unless the execution is
    /// pending.
    pub fn start(self, clock: &impl Clock) -> Result<Self, AgentExecutionTransitionError> {
        match self {
            Self::Pending { requested_at } => Ok(Self::Running {
                requested_at,
                started_at: clock.utc(),
            }),
            other => Err(AgentExecutionTransitionError {
                from: other.status_str(),
            }),
        }
    }

    /// Marks the execution as completed.
    ///
    /// # Errors
    ///
    /// Returns [`AgentExecutionTransitionError`] unless the execution is
    /// running.
    pub fn complete(
        self,
        output: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, AgentExecutionTransitionError> {
        match self {
            Self::Running { started_at, .. } => Ok(Self::Completed {
                started_at,
                finished_at: clock.utc(),
                output,
            }),
            other => Err(AgentExecutionTransitionError {
                from: other.status_str(),
            }),
        }
    }

    /// Marks the execution as failed.
    ///
    /// # Errors
    ///
    /// Returns [`AgentExecutionTransitionError`] unless the execution is
    /// running.
    pub fn fail(
        self,
        error: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, AgentExecutionTransitionError> {
        match self {
            Self::Running { started_at, .. } => Ok(Self::Failed {
                started_at,
                finished_at: clock.utc(),
                error: error.into(),
            }),
            other => Err(AgentExecutionTransitionError {
                from: other.status_str(),
            }),
        }
    }
}
