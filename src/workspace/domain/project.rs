//! Project aggregate: a named grouping of tasks within a workspace.

use super::workspace::validated_name;
use super::{ProjectId, ShortCode, WorkspaceDomainError, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Named grouping of tasks within a workspace.
///
/// The project short code takes precedence over the workspace short code
/// when constructing display IDs for tasks assigned to the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    workspace_id: WorkspaceId,
    name: String,
    short_code: ShortCode,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Workspace the project belongs to.
    pub workspace_id: WorkspaceId,
    /// Persisted project name.
    pub name: String,
    /// Persisted short code.
    pub short_code: ShortCode,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project in the given workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(
        workspace_id: WorkspaceId,
        name: impl Into<String>,
        short_code: ShortCode,
        clock: &impl Clock,
    ) -> Result<Self, WorkspaceDomainError> {
        let name = validated_name(name)?;
        Ok(Self {
            id: ProjectId::new(),
            workspace_id,
            name,
            short_code,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            name: data.name,
            short_code: data.short_code,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display-ID short code for project-scoped tasks.
    #[must_use]
    pub const fn short_code(&self) -> &ShortCode {
        &self.short_code
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Confirms the project belongs to the given workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::CrossTenantProject`] when the project
    /// is owned by a different workspace.
    pub fn ensure_in_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<(), WorkspaceDomainError> {
        if self.workspace_id == workspace_id {
            Ok(())
        } else {
            Err(WorkspaceDomainError::CrossTenantProject {
                project_id: self.id,
                workspace_id,
            })
        }
    }
}
