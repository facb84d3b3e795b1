//! In-memory processed-event store for tests and services.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::ingest::{
    domain::SlackEventTs,
    ports::{ProcessedEventError, ProcessedEventResult, ProcessedEventStore},
};
use crate::workspace::domain::WorkspaceId;

/// Thread-safe in-memory processed-event store.
///
/// The claim happens under one write lock, so concurrent claims for the same
/// pair resolve to exactly one winner.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProcessedEventStore {
    claimed: Arc<RwLock<HashSet<(WorkspaceId, String)>>>,
}

impl InMemoryProcessedEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> ProcessedEventError {
    ProcessedEventError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProcessedEventStore for InMemoryProcessedEventStore {
    async fn claim(
        &self,
        workspace_id: WorkspaceId,
        event_ts: &SlackEventTs,
    ) -> ProcessedEventResult<bool> {
        let mut claimed = self.claimed.write().map_err(lock_poisoned)?;
        Ok(claimed.insert((workspace_id, event_ts.as_str().to_owned())))
    }
}
