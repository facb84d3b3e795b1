//! Ports for inbound event deduplication.

mod dedup;

pub use dedup::{ProcessedEventError, ProcessedEventResult, ProcessedEventStore};
