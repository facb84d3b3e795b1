//! Domain model for task identity and lifecycle.
//!
//! Tasks carry counter-scoped sequential identity (task number + display
//! ID), unconstrained kanban status overwrites with `completed_at`
//! bookkeeping, tagged-union provenance, and an append-only activity log.
//! Infrastructure concerns stay outside the domain boundary.

mod activity;
mod context;
mod error;
mod ids;
mod source;
mod status;
mod task;

pub use activity::{ActivityEntry, ActivityType};
pub use context::{
    AgentExecution, AgentExecutionTransitionError, Attachment, CodeContext, GithubLink,
};
pub use error::{
    ParseActivityTypeError, ParseTaskPriorityError, ParseTaskStatusError, ParseTaskTypeError,
    TaskDomainError,
};
pub use ids::{ActivityId, DisplayId, TaskId, TaskNumber, TaskTitle};
pub use source::{ExtractionMetadata, TaskSource};
pub use status::{TaskPriority, TaskStatus, TaskType};
pub use task::{
    PersistedTaskData, StatusChange, Task, TaskContent, TaskFilter, TaskIdentity,
};
