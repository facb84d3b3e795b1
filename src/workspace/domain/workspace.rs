//! Workspace aggregate: the top-level tenant.

use super::{ShortCode, WorkspaceDomainError, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Top-level tenant, corresponding to one connected Slack team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    name: String,
    short_code: ShortCode,
    slack_team_id: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkspaceData {
    /// Persisted workspace identifier.
    pub id: WorkspaceId,
    /// Persisted workspace name.
    pub name: String,
    /// Persisted short code.
    pub short_code: ShortCode,
    /// Persisted Slack team linkage, if any.
    pub slack_team_id: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a new workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        short_code: ShortCode,
        clock: &impl Clock,
    ) -> Result<Self, WorkspaceDomainError> {
        let name = validated_name(name)?;
        Ok(Self {
            id: WorkspaceId::new(),
            name,
            short_code,
            slack_team_id: None,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a workspace from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkspaceData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            short_code: data.short_code,
            slack_team_id: data.slack_team_id,
            created_at: data.created_at,
        }
    }

    /// Links the workspace to a Slack team.
    #[must_use]
    pub fn with_slack_team(mut self, team_id: impl Into<String>) -> Self {
        self.slack_team_id = Some(team_id.into());
        self
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn id(&self) -> WorkspaceId {
        self.id
    }

    /// Returns the workspace name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display-ID short code for workspace-scoped tasks.
    #[must_use]
    pub const fn short_code(&self) -> &ShortCode {
        &self.short_code
    }

    /// Returns the linked Slack team identifier, if any.
    #[must_use]
    pub fn slack_team_id(&self) -> Option<&str> {
        self.slack_team_id.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Trims and validates a workspace or project name.
pub(super) fn validated_name(name: impl Into<String>) -> Result<String, WorkspaceDomainError> {
    let raw = name.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(WorkspaceDomainError::EmptyName);
    }
    Ok(normalized.to_owned())
}
