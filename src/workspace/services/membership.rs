//! Service layer for workspace and project creation and membership management.

use crate::workspace::{
    domain::{
        MemberRole, Membership, Project, ProjectId, ShortCode, UserId, Workspace,
        WorkspaceDomainError, WorkspaceId,
    },
    ports::{WorkspaceRepository, WorkspaceRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for membership operations.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkspaceDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkspaceRepositoryError),
    /// The acting user lacks the required role.
    #[error("user {user_id} is not an admin of workspace {workspace_id}")]
    NotAuthorized {
        /// Acting user.
        user_id: UserId,
        /// Workspace acted upon.
        workspace_id: WorkspaceId,
    },
}

/// Result type for membership service operations.
pub type MembershipResult<T> = Result<T, MembershipError>;

/// Workspace and membership orchestration service.
#[derive(Clone)]
pub struct MembershipService<W, C>
where
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<W>,
    clock: Arc<C>,
}

impl<W, C> MembershipService<W, C>
where
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(repository: Arc<W>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a workspace and enrolls the founding user as admin.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when validation fails or persistence
    /// rejects the workspace.
    pub async fn create_workspace(
        &self,
        name: impl Into<String> + Send,
        short_code: impl Into<String> + Send,
        founder: UserId,
    ) -> MembershipResult<Workspace> {
        let code = ShortCode::new(short_code)?;
        let workspace = Workspace::new(name, code, &*self.clock)?;
        self.repository.store_workspace(&workspace).await?;
        let membership = Membership::new(workspace.id(), founder, MemberRole::Admin, &*self.clock);
        self.repository.upsert_membership(&membership).await?;
        Ok(workspace)
    }

    /// Creates a project inside an existing workspace.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when the workspace does not exist or
    /// validation fails.
    pub async fn create_project(
        &self,
        workspace_id: WorkspaceId,
        name: impl Into<String> + Send,
        short_code: impl Into<String> + Send,
    ) -> MembershipResult<Project> {
        self.ensure_workspace_exists(workspace_id).await?;
        let code = ShortCode::new(short_code)?;
        let project = Project::new(workspace_id, name, code, &*self.clock)?;
        self.repository.store_project(&project).await?;
        Ok(project)
    }

    /// Adds or updates a member. Requires the actor to be an admin.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::NotAuthorized`] when the actor is not an
    /// admin of the workspace.
    pub async fn add_member(
        &self,
        actor: &UserId,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
    ) -> MembershipResult<Membership> {
        self.ensure_admin(workspace_id, actor).await?;
        let membership = Membership::new(workspace_id, user_id, role, &*self.clock);
        self.repository.upsert_membership(&membership).await?;
        Ok(membership)
    }

    /// Removes a member. Requires the actor to be an admin.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::NotAuthorized`] when the actor is not an
    /// admin, or [`WorkspaceRepositoryError::MemberNotFound`] when the target
    /// is not a member.
    pub async fn remove_member(
        &self,
        actor: &UserId,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> MembershipResult<()> {
        self.ensure_admin(workspace_id, actor).await?;
        self.repository
            .remove_membership(workspace_id, user_id)
            .await?;
        Ok(())
    }

    /// Returns the role a user holds in a workspace, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Repository`] when the lookup fails.
    pub async fn member_role(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> MembershipResult<Option<MemberRole>> {
        Ok(self.repository.member_role(workspace_id, user_id).await?)
    }

    /// Looks up a project, verifying it belongs to the given workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::ProjectNotFound`] when the project
    /// does not exist and [`WorkspaceDomainError::CrossTenantProject`] when it
    /// belongs to another workspace.
    pub async fn project_in_workspace(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> MembershipResult<Project> {
        let project = self
            .repository
            .find_project(project_id)
            .await?
            .ok_or(WorkspaceRepositoryError::ProjectNotFound(project_id))?;
        project.ensure_in_workspace(workspace_id)?;
        Ok(project)
    }

    async fn ensure_workspace_exists(&self, workspace_id: WorkspaceId) -> MembershipResult<()> {
        self.repository
            .find_workspace(workspace_id)
            .await?
            .ok_or(WorkspaceRepositoryError::WorkspaceNotFound(workspace_id))?;
        Ok(())
    }

    async fn ensure_admin(
        &self,
        workspace_id: WorkspaceId,
        actor: &UserId,
    ) -> MembershipResult<()> {
        let role = self.repository.member_role(workspace_id, actor).await?;
        if role.is_some_and(MemberRole::is_admin) {
            Ok(())
        } else {
            Err(MembershipError::NotAuthorized {
                user_id: actor.clone(),
                workspace_id,
            })
        }
    }
}
