//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task number is invalid.
    #[error("invalid task number {0}, expected a positive integer")]
    InvalidTaskNumber(u64),

    /// The display ID does not follow `CODE-number` format.
    #[error("invalid display id '{0}', expected e.g. TM-123")]
    InvalidDisplayId(String),

    /// The extraction confidence is out of range.
    #[error("extraction confidence {0} exceeds 100 percent")]
    InvalidConfidence(u8),

    /// The GitHub issue URL is empty after trimming.
    #[error("github issue url must not be empty")]
    EmptyIssueUrl,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing task types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);

/// Error returned while parsing activity types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity type: {0}")]
pub struct ParseActivityTypeError(pub String);
