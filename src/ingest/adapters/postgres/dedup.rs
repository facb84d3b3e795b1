//! `PostgreSQL` processed-event store.

use super::schema::processed_slack_events;
use crate::ingest::{
    domain::SlackEventTs,
    ports::{ProcessedEventError, ProcessedEventResult, ProcessedEventStore},
};
use crate::task::adapters::postgres::TaskPgPool;
use crate::workspace::domain::WorkspaceId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed processed-event store.
///
/// The claim is a single insert with conflict suppression: the first claim
/// inserts one row, every later claim inserts zero. The primary key makes the
/// race safe across processes.
#[derive(Debug, Clone)]
pub struct PostgresProcessedEventStore {
    pool: TaskPgPool,
}

impl PostgresProcessedEventStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProcessedEventResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProcessedEventResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProcessedEventError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProcessedEventError::persistence)?
    }
}

#[async_trait]
impl ProcessedEventStore for PostgresProcessedEventStore {
    async fn claim(
        &self,
        workspace_id: WorkspaceId,
        event_ts: &SlackEventTs,
    ) -> ProcessedEventResult<bool> {
        let event_ts = event_ts.as_str().to_owned();
        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(processed_slack_events::table)
                .values((
                    processed_slack_events::workspace_id.eq(workspace_id.into_inner()),
                    processed_slack_events::event_ts.eq(&event_ts),
                    processed_slack_events::processed_at.eq(diesel::dsl::now),
                ))
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(ProcessedEventError::persistence)?;
            Ok(inserted == 1)
        })
        .await
    }
}
