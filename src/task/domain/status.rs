//! Status, priority, and type enumerations for tasks.

use super::{ParseTaskPriorityError, ParseTaskStatusError, ParseTaskTypeError};
use serde::{Deserialize, Serialize};

/// Kanban status of a task.
///
/// Transitions are deliberately unconstrained: any status may be overwritten
/// with any other. Cancellation is a status value, not a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Captured but not yet scheduled.
    Backlog,
    /// Scheduled for work.
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    InReview,
    /// Completed.
    Done,
    /// Abandoned; excluded from board projections.
    Cancelled,
}

impl TaskStatus {
    /// Board column order. Cancelled tasks have no column.
    pub const BOARD_COLUMNS: [Self; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::InProgress,
        Self::InReview,
        Self::Done,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the status is the cancelled tombstone.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Drop everything.
    Critical,
    /// Address soon.
    High,
    /// Default urgency.
    Medium,
    /// Address eventually.
    Low,
}

impl TaskPriority {
    /// All priority levels, in severity order.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Classification of the work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Defect report.
    Bug,
    /// New functionality.
    Feature,
    /// Enhancement to existing behavior.
    Improvement,
    /// General chore.
    Task,
    /// Open question needing an answer.
    Question,
}

impl TaskType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Improvement => "improvement",
            Self::Task => "task",
            Self::Question => "question",
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "bug" => Ok(Self::Bug),
            "feature" => Ok(Self::Feature),
            "improvement" => Ok(Self::Improvement),
            "task" => Ok(Self::Task),
            "question" => Ok(Self::Question),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}
