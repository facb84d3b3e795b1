//! Repository port for invitation persistence.

use crate::workspace::domain::{Invitation, InvitationId, InvitationToken, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for invitation repository operations.
pub type InvitationRepositoryResult<T> = Result<T, InvitationRepositoryError>;

/// Invitation persistence contract.
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Stores a new invitation.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::DuplicateInvitation`] when the
    /// invitation ID or token already exists.
    async fn store(&self, invitation: &Invitation) -> InvitationRepositoryResult<()>;

    /// Persists a status change to an existing invitation.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::NotFound`] when the invitation
    /// does not exist.
    async fn update(&self, invitation: &Invitation) -> InvitationRepositoryResult<()>;

    /// Finds an invitation by token.
    ///
    /// Returns `None` when no invitation carries the token.
    async fn find_by_token(
        &self,
        token: &InvitationToken,
    ) -> InvitationRepositoryResult<Option<Invitation>>;

    /// Returns all pending invitations for a workspace.
    async fn pending_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> InvitationRepositoryResult<Vec<Invitation>>;
}

/// Errors returned by invitation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InvitationRepositoryError {
    /// An invitation with the same identifier or token already exists.
    #[error("duplicate invitation: {0}")]
    DuplicateInvitation(InvitationId),

    /// The invitation was not found.
    #[error("invitation not found: {0}")]
    NotFound(InvitationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InvitationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
