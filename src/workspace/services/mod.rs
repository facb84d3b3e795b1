//! Application services for workspace tenancy orchestration.

mod api_keys;
mod invitations;
mod membership;

pub use api_keys::{ApiKeyError, ApiKeyResult, ApiKeyService};
pub use invitations::{InvitationError, InvitationResult, InvitationService};
pub use membership::{MembershipError, MembershipResult, MembershipService};
