//! Diesel row models for task persistence.

use super::schema::{task_activity, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query/insert row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Project the task belongs to, if any.
    pub project_id: Option<uuid::Uuid>,
    /// Connected source repository, if any.
    pub repository_id: Option<uuid::Uuid>,
    /// Sequential number within the counter scope.
    pub task_number: i64,
    /// Derived human-readable identifier.
    pub display_id: String,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Kanban status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Work classification.
    pub task_type: String,
    /// Provenance payload.
    pub source: Value,
    /// Assigned user, if any.
    pub assignee: Option<String>,
    /// Free-form labels.
    pub labels: Value,
    /// Code context payload, if any.
    pub code_context: Option<Value>,
    /// Attachment references.
    pub attachments: Value,
    /// AI-extraction metadata, if any.
    pub extraction: Option<Value>,
    /// Agent execution state, if any.
    pub agent_execution: Option<Value>,
    /// GitHub linkage, if any.
    pub github_link: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, set only while status is done.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Query/insert row for activity-log entries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_activity)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Kind of change recorded.
    pub activity_type: String,
    /// Value before the change, if captured.
    pub before_value: Option<String>,
    /// Value after the change, if captured.
    pub after_value: Option<String>,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}
