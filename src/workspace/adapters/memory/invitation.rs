//! In-memory invitation repository for tests and services.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workspace::{
    domain::{Invitation, InvitationId, InvitationStatus, InvitationToken, WorkspaceId},
    ports::{InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult},
};

/// Thread-safe in-memory invitation repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvitationRepository {
    state: Arc<RwLock<InMemoryInvitationState>>,
}

#[derive(Debug, Default)]
struct InMemoryInvitationState {
    invitations: HashMap<InvitationId, Invitation>,
    token_index: HashMap<String, InvitationId>,
}

impl InMemoryInvitationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> InvitationRepositoryError {
    InvitationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn store(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let token_key = invitation.token().as_str().to_owned();
        if state.invitations.contains_key(&invitation.id())
            || state.token_index.contains_key(&token_key)
        {
            return Err(InvitationRepositoryError::DuplicateInvitation(
                invitation.id(),
            ));
        }
        state.token_index.insert(token_key, invitation.id());
        state.invitations.insert(invitation.id(), invitation.clone());
        Ok(())
    }

    async fn update(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.invitations.contains_key(&invitation.id()) {
            return Err(InvitationRepositoryError::NotFound(invitation.id()));
        }
        state.invitations.insert(invitation.id(), invitation.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &InvitationToken,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let invitation = state
            .token_index
            .get(token.as_str())
            .and_then(|id| state.invitations.get(id))
            .cloned();
        Ok(invitation)
    }

    async fn pending_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> InvitationRepositoryResult<Vec<Invitation>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .invitations
            .values()
            .filter(|invitation| {
                invitation.workspace_id() == workspace_id
                    && invitation.status() == InvitationStatus::Pending
            })
            .cloned()
            .collect())
    }
}
