//! In-memory workspace/project/membership repository for tests and services.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workspace::{
    domain::{MemberRole, Membership, Project, ProjectId, UserId, Workspace, WorkspaceId},
    ports::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult},
};

/// Thread-safe in-memory workspace repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceRepository {
    state: Arc<RwLock<InMemoryWorkspaceState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkspaceState {
    workspaces: HashMap<WorkspaceId, Workspace>,
    projects: HashMap<ProjectId, Project>,
    memberships: HashMap<(WorkspaceId, UserId), Membership>,
}

impl InMemoryWorkspaceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> WorkspaceRepositoryError {
    WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn store_workspace(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.workspaces.contains_key(&workspace.id()) {
            return Err(WorkspaceRepositoryError::DuplicateWorkspace(workspace.id()));
        }
        state.workspaces.insert(workspace.id(), workspace.clone());
        Ok(())
    }

    async fn find_workspace(
        &self,
        id: WorkspaceId,
    ) -> WorkspaceRepositoryResult<Option<Workspace>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.workspaces.get(&id).cloned())
    }

    async fn store_project(&self, project: &Project) -> WorkspaceRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.projects.contains_key(&project.id()) {
            return Err(WorkspaceRepositoryError::DuplicateProject(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> WorkspaceRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn upsert_membership(&self, membership: &Membership) -> WorkspaceRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = (membership.workspace_id(), membership.user_id().clone());
        state.memberships.insert(key, membership.clone());
        Ok(())
    }

    async fn member_role(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> WorkspaceRepositoryResult<Option<MemberRole>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let key = (workspace_id, user_id.clone());
        Ok(state.memberships.get(&key).map(Membership::role))
    }

    async fn remove_membership(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> WorkspaceRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = (workspace_id, user_id.clone());
        if state.memberships.remove(&key).is_none() {
            return Err(WorkspaceRepositoryError::MemberNotFound {
                workspace_id,
                user_id: user_id.clone(),
            });
        }
        Ok(())
    }
}
