//! Port contracts for task identity and lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod counter;
pub mod repository;

pub use counter::{CounterAllocator, CounterError, CounterResult, CounterScope, CounterType};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
