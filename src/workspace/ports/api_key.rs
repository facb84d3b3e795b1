//! Repository port for API key persistence.

use crate::workspace::domain::{ApiKey, ApiKeyId, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for API key repository operations.
pub type ApiKeyRepositoryResult<T> = Result<T, ApiKeyRepositoryError>;

/// API key persistence contract.
///
/// Only digests and display prefixes cross this boundary; full secrets are
/// never persisted.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Stores a new key record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiKeyRepositoryError::DuplicateKey`] when the key ID
    /// already exists.
    async fn store(&self, key: &ApiKey) -> ApiKeyRepositoryResult<()>;

    /// Finds a key record by secret digest.
    ///
    /// Returns `None` when no key matches.
    async fn find_by_digest(&self, digest: &str) -> ApiKeyRepositoryResult<Option<ApiKey>>;

    /// Returns all key records scoped to a project.
    async fn list_for_project(&self, project_id: ProjectId)
    -> ApiKeyRepositoryResult<Vec<ApiKey>>;

    /// Deletes a key record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiKeyRepositoryError::NotFound`] when the key does not
    /// exist.
    async fn revoke(&self, id: ApiKeyId) -> ApiKeyRepositoryResult<()>;
}

/// Errors returned by API key repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ApiKeyRepositoryError {
    /// A key with the same identifier already exists.
    #[error("duplicate api key identifier: {0}")]
    DuplicateKey(ApiKeyId),

    /// The key was not found.
    #[error("api key not found: {0}")]
    NotFound(ApiKeyId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ApiKeyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
