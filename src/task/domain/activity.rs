//! Append-only activity log entries for task audit trails.

use super::{ActivityId, ParseActivityTypeError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Kind of change an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Task created.
    Created,
    /// Status overwritten.
    StatusChanged,
    /// Priority overwritten.
    PriorityChanged,
    /// Assignee changed or cleared.
    AssigneeChanged,
}

impl ActivityType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StatusChanged => "status_changed",
            Self::PriorityChanged => "priority_changed",
            Self::AssigneeChanged => "assignee_changed",
        }
    }
}

impl TryFrom<&str> for ActivityType {
    type Error = ParseActivityTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "status_changed" => Ok(Self::StatusChanged),
            "priority_changed" => Ok(Self::PriorityChanged),
            "assignee_changed" => Ok(Self::AssigneeChanged),
            _ => Err(ParseActivityTypeError(value.to_owned())),
        }
    }
}

/// Immutable audit record of a single task change.
///
/// Entries are appended by the task service and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    id: ActivityId,
    task_id: TaskId,
    activity_type: ActivityType,
    before: Option<String>,
    after: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Records a new activity entry.
    #[must_use]
    pub fn record(
        task_id: TaskId,
        activity_type: ActivityType,
        before: Option<String>,
        after: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            task_id,
            activity_type,
            before,
            after,
            recorded_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ActivityId,
        task_id: TaskId,
        activity_type: ActivityType,
        before: Option<String>,
        after: Option<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            activity_type,
            before,
            after,
            recorded_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the recorded change kind.
    #[must_use]
    pub const fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    /// Returns the value before the change, if captured.
    #[must_use]
    pub fn before(&self) -> Option<&str> {
        self.before.as_deref()
    }

    /// Returns the value after the change, if captured.
    #[must_use]
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Returns when the change was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
