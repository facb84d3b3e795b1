//! Storage adapters for the ingest context.

pub mod memory;
pub mod postgres;
