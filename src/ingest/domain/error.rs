//! Domain errors for inbound event handling.

use thiserror::Error;

/// Validation failures for inbound events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestDomainError {
    /// The Slack event timestamp was empty or malformed.
    #[error("invalid slack event timestamp: {0:?}")]
    InvalidEventTs(String),

    /// The Slack channel identifier was empty.
    #[error("slack channel identifier must not be empty")]
    EmptyChannel,

    /// The imported issue title was empty.
    #[error("imported issue title must not be empty")]
    EmptyIssueTitle,
}
