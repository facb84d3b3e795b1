//! Project-scoped API keys for the external task-management surface.
//!
//! The full secret is shown exactly once at issuance. Only a SHA-256 digest
//! and a truncated display prefix are persisted; verification hashes the
//! presented secret and compares digests.

use super::{ApiKeyId, ProjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix carried by every issued secret.
pub const SECRET_PREFIX: &str = "nrbt_";

/// Number of leading secret characters retained for re-display.
const DISPLAY_PREFIX_LEN: usize = 12;

/// Persisted API key record. Never contains the full secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    id: ApiKeyId,
    project_id: ProjectId,
    label: String,
    digest: String,
    display_prefix: String,
    created_at: DateTime<Utc>,
}

/// Result of issuing a new key: the record plus the one-time-visible secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedApiKey {
    /// The record to persist.
    pub record: ApiKey,
    /// Full secret value. Shown once; never stored.
    pub secret: String,
}

/// Parameter object for reconstructing a persisted API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApiKeyData {
    /// Persisted key identifier.
    pub id: ApiKeyId,
    /// Project the key is scoped to.
    pub project_id: ProjectId,
    /// Human-readable key label.
    pub label: String,
    /// Hex SHA-256 digest of the full secret.
    pub digest: String,
    /// Truncated secret prefix for re-display.
    pub display_prefix: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Issues a new key scoped to the given project.
    #[must_use]
    pub fn issue(project_id: ProjectId, label: impl Into<String>, clock: &impl Clock) -> IssuedApiKey {
        let secret = format!("{SECRET_PREFIX}{}", Uuid::new_v4().simple());
        let display_prefix: String = secret.chars().take(DISPLAY_PREFIX_LEN).collect();
        let record = Self {
            id: ApiKeyId::new(),
            project_id,
            label: label.into(),
            digest: digest_of(&secret),
            display_prefix,
            created_at: clock.utc(),
        };
        IssuedApiKey { record, secret }
    }

    /// Reconstructs a key record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApiKeyData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            label: data.label,
            digest: data.digest,
            display_prefix: data.display_prefix,
            created_at: data.created_at,
        }
    }

    /// Returns the key identifier.
    #[must_use]
    pub const fn id(&self) -> ApiKeyId {
        self.id
    }

    /// Returns the project the key is scoped to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the key label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the hex SHA-256 digest of the secret.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Returns the truncated prefix safe for re-display.
    #[must_use]
    pub fn display_prefix(&self) -> &str {
        &self.display_prefix
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Checks a presented secret against the stored digest.
    #[must_use]
    pub fn verify(&self, presented: &str) -> bool {
        digest_of(presented) == self.digest
    }
}

/// Computes the hex SHA-256 digest of a secret.
#[must_use]
pub fn digest_of(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
