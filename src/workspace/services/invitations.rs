//! Service layer for issuing, redeeming, and sweeping invitations.

use crate::workspace::{
    domain::{
        Invitation, InvitationToken, MemberRole, Membership, UserId, WorkspaceDomainError,
        WorkspaceId,
    },
    ports::{
        InvitationRepository, InvitationRepositoryError, WorkspaceRepository,
        WorkspaceRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for invitation operations.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// Domain validation failed (includes expiry and reuse rejections).
    #[error(transparent)]
    Domain(#[from] WorkspaceDomainError),
    /// Invitation persistence failed.
    #[error(transparent)]
    Invitations(#[from] InvitationRepositoryError),
    /// Workspace persistence failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceRepositoryError),
    /// No invitation carries the presented token.
    #[error("unknown invitation token")]
    UnknownToken,
    /// The acting user lacks the required role.
    #[error("user {user_id} may not manage invitations for workspace {workspace_id}")]
    NotAuthorized {
        /// Acting user.
        user_id: UserId,
        /// Workspace acted upon.
        workspace_id: WorkspaceId,
    },
}

/// Result type for invitation service operations.
pub type InvitationResult<T> = Result<T, InvitationError>;

/// Invitation lifecycle orchestration service.
#[derive(Clone)]
pub struct InvitationService<I, W, C>
where
    I: InvitationRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    invitations: Arc<I>,
    workspaces: Arc<W>,
    clock: Arc<C>,
}

impl<I, W, C> InvitationService<I, W, C>
where
    I: InvitationRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new invitation service.
    #[must_use]
    pub const fn new(invitations: Arc<I>, workspaces: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            invitations,
            workspaces,
            clock,
        }
    }

    /// Issues an invitation. The actor must be a member of the workspace.
    ///
    /// The returned invitation carries the full token; this is the only time
    /// callers should surface it.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::NotAuthorized`] when the actor is not a
    /// member.
    pub async fn invite(
        &self,
        actor: &UserId,
        workspace_id: WorkspaceId,
        email: impl Into<String> + Send,
        role: MemberRole,
    ) -> InvitationResult<Invitation> {
        let actor_role = self.workspaces.member_role(workspace_id, actor).await?;
        if actor_role.is_none() {
            return Err(InvitationError::NotAuthorized {
                user_id: actor.clone(),
                workspace_id,
            });
        }
        let invitation = Invitation::issue(workspace_id, email, role, &*self.clock)?;
        self.invitations.store(&invitation).await?;
        Ok(invitation)
    }

    /// Redeems an invitation token, enrolling the user with the invited role.
    ///
    /// Acceptance past the seven-day window fails with
    /// [`WorkspaceDomainError::InvitationExpired`] and leaves the stored
    /// status `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::UnknownToken`] when no invitation carries
    /// the token, plus domain errors for expired or already-redeemed
    /// invitations.
    pub async fn accept(&self, token: &str, user_id: UserId) -> InvitationResult<Membership> {
        let parsed = InvitationToken::try_from(token)?;
        let mut invitation = self
            .invitations
            .find_by_token(&parsed)
            .await?
            .ok_or(InvitationError::UnknownToken)?;
        invitation.accept(&*self.clock)?;
        self.invitations.update(&invitation).await?;
        let membership = Membership::new(
            invitation.workspace_id(),
            user_id,
            invitation.role(),
            &*self.clock,
        );
        self.workspaces.upsert_membership(&membership).await?;
        Ok(membership)
    }

    /// Withdraws a pending invitation. The actor must be an admin.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::NotAuthorized`] when the actor is not an
    /// admin of the invitation's workspace.
    pub async fn cancel(&self, actor: &UserId, token: &str) -> InvitationResult<Invitation> {
        let parsed = InvitationToken::try_from(token)?;
        let mut invitation = self
            .invitations
            .find_by_token(&parsed)
            .await?
            .ok_or(InvitationError::UnknownToken)?;
        let actor_role = self
            .workspaces
            .member_role(invitation.workspace_id(), actor)
            .await?;
        if !actor_role.is_some_and(MemberRole::is_admin) {
            return Err(InvitationError::NotAuthorized {
                user_id: actor.clone(),
                workspace_id: invitation.workspace_id(),
            });
        }
        invitation.cancel()?;
        self.invitations.update(&invitation).await?;
        Ok(invitation)
    }

    /// Marks overdue pending invitations as expired.
    ///
    /// Returns the number of invitations transitioned.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Invitations`] when persistence fails.
    pub async fn sweep_expired(&self, workspace_id: WorkspaceId) -> InvitationResult<usize> {
        let pending = self.invitations.pending_for_workspace(workspace_id).await?;
        let mut swept = 0;
        for mut invitation in pending {
            if invitation.expire(&*self.clock)? {
                self.invitations.update(&invitation).await?;
                swept += 1;
            }
        }
        Ok(swept)
    }
}
