//! Error types for workspace domain validation and parsing.

use super::{InvitationId, ProjectId, WorkspaceId};
use thiserror::Error;

/// Errors returned while constructing or mutating workspace domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// The workspace or project name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The short code is not 1-6 uppercase alphanumeric characters.
    #[error("invalid short code '{0}', expected 1-6 uppercase alphanumerics")]
    InvalidShortCode(String),

    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The invitation email is empty after trimming.
    #[error("invitation email must not be empty")]
    EmptyEmail,

    /// The invitation token is not 32 alphanumeric characters.
    #[error("invalid invitation token")]
    InvalidInvitationToken,

    /// The invitation is past its acceptance deadline.
    #[error("invitation {0} has expired")]
    InvitationExpired(InvitationId),

    /// The invitation is no longer pending.
    #[error("invitation {id} is {status}, expected pending")]
    InvitationNotPending {
        /// Invitation identifier.
        id: InvitationId,
        /// Current invitation status.
        status: &'static str,
    },

    /// The project does not belong to the stated workspace.
    #[error("project {project_id} does not belong to workspace {workspace_id}")]
    CrossTenantProject {
        /// Referenced project identifier.
        project_id: ProjectId,
        /// Workspace the caller claimed the project belongs to.
        workspace_id: WorkspaceId,
    },
}

/// Error returned while parsing member roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown member role: {0}")]
pub struct ParseMemberRoleError(pub String);

/// Error returned while parsing invitation statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown invitation status: {0}")]
pub struct ParseInvitationStatusError(pub String);
