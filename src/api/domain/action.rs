//! Actions accepted by the external task-management surface.

use crate::task::domain::{TaskPriority, TaskStatus, TaskType};
use serde::Deserialize;

/// One request against the external API, keyed by its `action` field.
///
/// Every action runs inside the project scope of the presented API key;
/// callers never name a workspace or project themselves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TaskAction {
    /// Returns the project board.
    List,
    /// Creates a task in the project backlog.
    Create {
        /// Task title.
        title: String,
        /// Task description.
        #[serde(default)]
        description: Option<String>,
        /// Task priority. Defaults to medium.
        #[serde(default)]
        priority: Option<TaskPriority>,
        /// Work classification. Defaults to `task`.
        #[serde(default)]
        task_type: Option<TaskType>,
        /// Labels to attach.
        #[serde(default)]
        labels: Vec<String>,
    },
    /// Updates content fields of an existing task.
    Update {
        /// Display ID of the task to update.
        display_id: String,
        /// Replacement title.
        #[serde(default)]
        title: Option<String>,
        /// Replacement description.
        #[serde(default)]
        description: Option<String>,
        /// Replacement priority.
        #[serde(default)]
        priority: Option<TaskPriority>,
        /// Replacement assignee. An empty string clears the assignee.
        #[serde(default)]
        assignee: Option<String>,
    },
    /// Moves a task to another column.
    Status {
        /// Display ID of the task to move.
        display_id: String,
        /// Target status.
        status: TaskStatus,
    },
}
