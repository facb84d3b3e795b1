//! Repository port for workspace, project, and membership persistence.

use crate::workspace::domain::{
    MemberRole, Membership, Project, ProjectId, UserId, Workspace, WorkspaceId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace repository operations.
pub type WorkspaceRepositoryResult<T> = Result<T, WorkspaceRepositoryError>;

/// Workspace, project, and membership persistence contract.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Stores a new workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::DuplicateWorkspace`] when the
    /// workspace ID already exists.
    async fn store_workspace(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()>;

    /// Finds a workspace by identifier.
    ///
    /// Returns `None` when the workspace does not exist.
    async fn find_workspace(&self, id: WorkspaceId)
    -> WorkspaceRepositoryResult<Option<Workspace>>;

    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::DuplicateProject`] when the
    /// project ID already exists.
    async fn store_project(&self, project: &Project) -> WorkspaceRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_project(&self, id: ProjectId) -> WorkspaceRepositoryResult<Option<Project>>;

    /// Adds or replaces a membership record.
    async fn upsert_membership(&self, membership: &Membership) -> WorkspaceRepositoryResult<()>;

    /// Returns the role a user holds in a workspace.
    ///
    /// Returns `None` when the user is not a member.
    async fn member_role(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> WorkspaceRepositoryResult<Option<MemberRole>>;

    /// Removes a membership record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::MemberNotFound`] when the user is
    /// not a member of the workspace.
    async fn remove_membership(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> WorkspaceRepositoryResult<()>;
}

/// Errors returned by workspace repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceRepositoryError {
    /// A workspace with the same identifier already exists.
    #[error("duplicate workspace identifier: {0}")]
    DuplicateWorkspace(WorkspaceId),

    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The workspace was not found.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The membership record was not found.
    #[error("user {user_id} is not a member of workspace {workspace_id}")]
    MemberNotFound {
        /// Workspace searched.
        workspace_id: WorkspaceId,
        /// User searched for.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkspaceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
