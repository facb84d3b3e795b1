//! In-memory adapters for workspace tenancy persistence.

mod api_key;
mod invitation;
mod workspace;

pub use api_key::InMemoryApiKeyRepository;
pub use invitation::InMemoryInvitationRepository;
pub use workspace::InMemoryWorkspaceRepository;
