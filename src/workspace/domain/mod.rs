//! Domain model for workspace tenancy.
//!
//! Covers workspaces, projects, membership roles, single-use invitation
//! tokens, and project-scoped API keys, keeping all infrastructure concerns
//! outside of the domain boundary.

mod api_key;
mod error;
mod ids;
mod invitation;
mod member;
mod project;
mod workspace;

pub use api_key::{ApiKey, IssuedApiKey, PersistedApiKeyData, SECRET_PREFIX, digest_of};
pub use error::{ParseInvitationStatusError, ParseMemberRoleError, WorkspaceDomainError};
pub use ids::{
    ApiKeyId, InvitationId, ProjectId, RepositoryId, ShortCode, UserId, WorkspaceId,
};
pub use invitation::{Invitation, InvitationStatus, InvitationToken, PersistedInvitationData};
pub use member::{MemberRole, Membership};
pub use project::{PersistedProjectData, Project};
pub use workspace::{PersistedWorkspaceData, Workspace};
