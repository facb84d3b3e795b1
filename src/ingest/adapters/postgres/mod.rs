//! `PostgreSQL` adapters for inbound event deduplication.

mod dedup;
mod schema;

pub use dedup::PostgresProcessedEventStore;
