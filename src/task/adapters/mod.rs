//! Storage adapters for the task context.

pub mod memory;
pub mod postgres;
