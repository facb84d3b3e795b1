//! `PostgreSQL` adapters for task persistence and counter allocation.

mod counter;
mod models;
mod repository;
mod schema;

pub use counter::PostgresCounterAllocator;
pub use repository::{PostgresTaskRepository, TaskPgPool};
