//! Inbound Slack events and the task candidates extracted from them.

use super::IngestDomainError;
use crate::task::domain::{
    CodeContext, ExtractionMetadata, TaskPriority, TaskSource, TaskType,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slack event timestamp, e.g. `1726000000.000100`.
///
/// Slack guarantees the timestamp is unique per channel and reuses it as the
/// event identifier on redelivery, which makes it the deduplication key
/// within a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlackEventTs(String);

impl SlackEventTs {
    /// Returns the timestamp as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for SlackEventTs {
    type Error = IngestDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        let is_valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch == '.');
        if !is_valid {
            return Err(IngestDomainError::InvalidEventTs(value.to_owned()));
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for SlackEventTs {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SlackEventTs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The Slack message an ingestion request originates from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackMessage {
    channel_id: String,
    event_ts: SlackEventTs,
    thread_ts: Option<String>,
    permalink: Option<String>,
}

impl SlackMessage {
    /// Creates a validated message reference.
    ///
    /// # Errors
    ///
    /// Returns [`IngestDomainError::EmptyChannel`] when the channel is empty
    /// after trimming.
    pub fn new(
        channel_id: impl Into<String>,
        event_ts: SlackEventTs,
    ) -> Result<Self, IngestDomainError> {
        let raw = channel_id.into();
        let channel_id = raw.trim().to_owned();
        if channel_id.is_empty() {
            return Err(IngestDomainError::EmptyChannel);
        }
        Ok(Self {
            channel_id,
            event_ts,
            thread_ts: None,
            permalink: None,
        })
    }

    /// Marks the message as a thread reply.
    #[must_use]
    pub fn with_thread_ts(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    /// Attaches the message permalink.
    #[must_use]
    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = Some(permalink.into());
        self
    }

    /// Returns the channel the message was posted in.
    #[must_use]
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Returns the event timestamp.
    #[must_use]
    pub const fn event_ts(&self) -> &SlackEventTs {
        &self.event_ts
    }

    /// Returns the thread parent timestamp, if the message was a reply.
    #[must_use]
    pub fn thread_ts(&self) -> Option<&str> {
        self.thread_ts.as_deref()
    }

    /// Returns the message permalink, if captured.
    #[must_use]
    pub fn permalink(&self) -> Option<&str> {
        self.permalink.as_deref()
    }

    /// Builds the task provenance record for this message.
    #[must_use]
    pub fn to_source(&self) -> TaskSource {
        TaskSource::Slack {
            channel_id: self.channel_id.clone(),
            message_ts: self.event_ts.as_str().to_owned(),
            thread_ts: self.thread_ts.clone(),
            permalink: self.permalink.clone(),
        }
    }
}

/// One task candidate extracted from a Slack conversation.
///
/// Extraction itself happens upstream; this carries only its validated
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTask {
    /// Proposed task title.
    pub title: String,
    /// Proposed description.
    pub description: Option<String>,
    /// Proposed priority.
    pub priority: TaskPriority,
    /// Proposed work classification.
    pub task_type: TaskType,
    /// Proposed labels.
    pub labels: Vec<String>,
    /// Code locations mentioned in the conversation, if any.
    pub code_context: Option<CodeContext>,
    /// Model and confidence behind the proposal.
    pub extraction: ExtractionMetadata,
}

impl ExtractedTask {
    /// Creates a candidate with defaults: medium priority, `task` type, no
    /// labels, no code context.
    #[must_use]
    pub fn new(title: impl Into<String>, extraction: ExtractionMetadata) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::Medium,
            task_type: TaskType::Task,
            labels: Vec::new(),
            code_context: None,
            extraction,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
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
}
