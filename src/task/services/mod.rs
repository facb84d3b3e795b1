//! Task services: lifecycle orchestration over the task ports.

mod lifecycle;

pub use lifecycle::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskService};
