//! Service layer for issuing and authenticating project-scoped API keys.

use crate::workspace::{
    domain::{ApiKey, ApiKeyId, IssuedApiKey, ProjectId, digest_of},
    ports::{
        ApiKeyRepository, ApiKeyRepositoryError, WorkspaceRepository, WorkspaceRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for API key operations.
#[derive(Debug, Error)]
pub enum ApiKeyError {
    /// Key persistence failed.
    #[error(transparent)]
    Keys(#[from] ApiKeyRepositoryError),
    /// Workspace persistence failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceRepositoryError),
}

/// Result type for API key service operations.
pub type ApiKeyResult<T> = Result<T, ApiKeyError>;

/// API key orchestration service.
pub struct ApiKeyService<K, W, C>
where
    K: ApiKeyRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    keys: Arc<K>,
    workspaces: Arc<W>,
    clock: Arc<C>,
}

impl<K, W, C> Clone for ApiKeyService<K, W, C>
where
    K: ApiKeyRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
            workspaces: Arc::clone(&self.workspaces),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<K, W, C> ApiKeyService<K, W, C>
where
    K: ApiKeyRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new API key service.
    #[must_use]
    pub const fn new(keys: Arc<K>, workspaces: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            keys,
            workspaces,
            clock,
        }
    }

    /// Issues a key scoped to an existing project.
    ///
    /// The returned value carries the full secret; it is shown once and
    /// never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    pub async fn issue(
        &self,
        project_id: ProjectId,
        label: impl Into<String> + Send,
    ) -> ApiKeyResult<IssuedApiKey> {
        self.workspaces
            .find_project(project_id)
            .await?
            .ok_or(WorkspaceRepositoryError::ProjectNotFound(project_id))?;
        let issued = ApiKey::issue(project_id, label, &*self.clock);
        self.keys.store(&issued.record).await?;
        Ok(issued)
    }

    /// Authenticates a presented secret.
    ///
    /// Returns the matching key record, or `None` when no key matches.
    ///
    /// # Errors
    ///
    /// Returns [`ApiKeyError::Keys`] when the lookup fails.
    pub async fn authenticate(&self, presented: &str) -> ApiKeyResult<Option<ApiKey>> {
        let digest = digest_of(presented);
        let found = self.keys.find_by_digest(&digest).await?;
        Ok(found.filter(|key| key.verify(presented)))
    }

    /// Lists key records for a project. Secrets are not recoverable; only
    /// display prefixes are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiKeyError::Keys`] when the lookup fails.
    pub async fn list_for_project(&self, project_id: ProjectId) -> ApiKeyResult<Vec<ApiKey>> {
        Ok(self.keys.list_for_project(project_id).await?)
    }

    /// Revokes a key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiKeyRepositoryError::NotFound`] when the key does not
    /// exist.
    pub async fn revoke(&self, id: ApiKeyId) -> ApiKeyResult<()> {
        Ok(self.keys.revoke(id).await?)
    }
}
