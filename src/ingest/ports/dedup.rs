//! Deduplication port for inbound Slack events.

use crate::ingest::domain::SlackEventTs;
use crate::workspace::domain::WorkspaceId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for processed-event store operations.
pub type ProcessedEventResult<T> = Result<T, ProcessedEventError>;

/// First-winner claim store for inbound events.
///
/// Slack redelivers events on slow acknowledgements, so the same event may
/// arrive concurrently on several connections. The claim must be atomic:
/// exactly one caller per `(workspace, event timestamp)` pair sees `true`,
/// every other caller sees `false`.
#[async_trait]
pub trait ProcessedEventStore: Send + Sync {
    /// Claims an event for processing.
    ///
    /// Returns `true` for the first claim of the pair and `false` for every
    /// later claim. Claims are never released.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessedEventError`] when the store rejects the claim; the
    /// event stays unclaimed.
    async fn claim(
        &self,
        workspace_id: WorkspaceId,
        event_ts: &SlackEventTs,
    ) -> ProcessedEventResult<bool>;
}

/// Errors returned by processed-event store implementations.
#[derive(Debug, Clone, Error)]
pub enum ProcessedEventError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProcessedEventError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
