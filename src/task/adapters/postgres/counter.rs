//! `PostgreSQL` counter allocator.

use super::{repository::TaskPgPool, schema::counters};
use crate::task::{
    domain::TaskNumber,
    ports::{CounterAllocator, CounterError, CounterResult, CounterScope, CounterType},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed counter allocator.
///
/// The increment is a single upsert statement, so concurrent allocations for
/// the same scope serialize on the row lock and each caller observes a unique
/// value.
#[derive(Debug, Clone)]
pub struct PostgresCounterAllocator {
    pool: TaskPgPool,
}

impl PostgresCounterAllocator {
    /// Creates a new allocator from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CounterResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CounterResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CounterError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CounterError::persistence)?
    }
}

#[async_trait]
impl CounterAllocator for PostgresCounterAllocator {
    async fn allocate_next(
        &self,
        scope: CounterScope,
        counter_type: CounterType,
    ) -> CounterResult<TaskNumber> {
        let allocated = self
            .run_blocking(move |connection| {
                diesel::insert_into(counters::table)
                    .values((
                        counters::scope_id.eq(scope.scope_uuid()),
                        counters::counter_type.eq(counter_type.as_str()),
                        counters::current_value.eq(1_i64),
                    ))
                    .on_conflict((counters::scope_id, counters::counter_type))
                    .do_update()
                    .set(counters::current_value.eq(counters::current_value + 1))
                    .returning(counters::current_value)
                    .get_result::<i64>(connection)
                    .map_err(CounterError::persistence)
            })
            .await?;
        let value = u64::try_from(allocated).map_err(CounterError::persistence)?;
        Ok(TaskNumber::new(value)?)
    }
}
