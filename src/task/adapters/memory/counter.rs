//! In-memory counter allocator for tests and services.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::TaskNumber,
    ports::{CounterAllocator, CounterError, CounterResult, CounterScope, CounterType},
};

/// Mutex-guarded counter map mirroring the transactional increment the
/// `PostgreSQL` adapter performs in one statement.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCounterAllocator {
    counters: Arc<Mutex<HashMap<(CounterScope, CounterType), u64>>>,
}

impl InMemoryCounterAllocator {
    /// Creates an allocator with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a counter at a specific value, for scenario tests.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::Persistence`] when the lock is poisoned.
    pub fn seed(
        &self,
        scope: CounterScope,
        counter_type: CounterType,
        value: u64,
    ) -> CounterResult<()> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|err| CounterError::persistence(std::io::Error::other(err.to_string())))?;
        counters.insert((scope, counter_type), value);
        Ok(())
    }
}

#[async_trait]
impl CounterAllocator for InMemoryCounterAllocator {
    async fn allocate_next(
        &self,
        scope: CounterScope,
        counter_type: CounterType,
    ) -> CounterResult<TaskNumber> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|err| CounterError::persistence(std::io::Error::other(err.to_string())))?;
        let slot = counters.entry((scope, counter_type)).or_insert(0);
        *slot += 1;
        Ok(TaskNumber::new(*slot)?)
    }
}
