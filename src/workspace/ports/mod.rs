//! Port contracts for workspace tenancy.
//!
//! Ports define infrastructure-agnostic interfaces used by workspace
//! services.

pub mod api_key;
pub mod invitation;
pub mod repository;

pub use api_key::{ApiKeyRepository, ApiKeyRepositoryError, ApiKeyRepositoryResult};
pub use invitation::{InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult};
pub use repository::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult};
