//! In-memory adapters for inbound event deduplication.

mod dedup;

pub use dedup::InMemoryProcessedEventStore;
