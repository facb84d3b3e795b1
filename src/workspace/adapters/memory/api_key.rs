//! In-memory API key repository for tests and services.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workspace::{
    domain::{ApiKey, ApiKeyId, ProjectId},
    ports::{ApiKeyRepository, ApiKeyRepositoryError, ApiKeyRepositoryResult},
};

/// Thread-safe in-memory API key repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApiKeyRepository {
    state: Arc<RwLock<InMemoryApiKeyState>>,
}

#[derive(Debug, Default)]
struct InMemoryApiKeyState {
    keys: HashMap<ApiKeyId, ApiKey>,
    digest_index: HashMap<String, ApiKeyId>,
}

impl InMemoryApiKeyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> ApiKeyRepositoryError {
    ApiKeyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn store(&self, key: &ApiKey) -> ApiKeyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.keys.contains_key(&key.id()) {
            return Err(ApiKeyRepositoryError::DuplicateKey(key.id()));
        }
        state.digest_index.insert(key.digest().to_owned(), key.id());
        state.keys.insert(key.id(), key.clone());
        Ok(())
    }

    async fn find_by_digest(&self, digest: &str) -> ApiKeyRepositoryResult<Option<ApiKey>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let key = state
            .digest_index
            .get(digest)
            .and_then(|id| state.keys.get(id))
            .cloned();
        Ok(key)
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> ApiKeyRepositoryResult<Vec<ApiKey>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .keys
            .values()
            .filter(|key| key.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn revoke(&self, id: ApiKeyId) -> ApiKeyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let Some(key) = state.keys.remove(&id) else {
            return Err(ApiKeyRepositoryError::NotFound(id));
        };
        state.digest_index.remove(key.digest());
        Ok(())
    }
}
