//! Task provenance: where a task came from.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Origin of a task, persisted as a tagged union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskSource {
    /// Extracted from a Slack conversation.
    Slack {
        /// Slack channel the message was posted in.
        channel_id: String,
        /// Slack message timestamp (unique per channel).
        message_ts: String,
        /// Thread parent timestamp when the message was a reply.
        #[serde(skip_serializing_if = "Option::is_none")]
        thread_ts: Option<String>,
        /// Permalink to the originating message.
        #[serde(skip_serializing_if = "Option::is_none")]
        permalink: Option<String>,
    },
    /// Created by hand through the UI.
    Manual,
    /// Imported from a GitHub issue.
    Github {
        /// Issue number in the source repository.
        issue_number: u64,
        /// Canonical issue URL.
        url: String,
    },
    /// Created through the external API surface.
    Api,
}

impl TaskSource {
    /// Returns the Slack message timestamp when the source is Slack.
    #[must_use]
    pub fn slack_message_ts(&self) -> Option<&str> {
        match self {
            Self::Slack { message_ts, .. } => Some(message_ts),
            _ => None,
        }
    }
}

/// Metadata recorded when an AI model extracted the task from a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    model: String,
    confidence_pct: u8,
}

impl ExtractionMetadata {
    /// Creates validated extraction metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidConfidence`] when the confidence
    /// exceeds 100 percent.
    pub fn new(
        model: impl Into<String>,
        confidence_pct: u8,
    ) -> Result<Self, TaskDomainError> {
        if confidence_pct > 100 {
            return Err(TaskDomainError::InvalidConfidence(confidence_pct));
        }
        Ok(Self {
            model: model.into(),
            confidence_pct,
        })
    }

    /// Returns the extracting model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the extraction confidence as a percentage.
    #[must_use]
    pub const fn confidence_pct(&self) -> u8 {
        self.confidence_pct
    }
}
