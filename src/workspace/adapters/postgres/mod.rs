//! `PostgreSQL` adapters for workspace tenancy persistence.

mod api_key;
mod invitation;
mod models;
mod repository;
mod schema;

pub use api_key::PostgresApiKeyRepository;
pub use invitation::PostgresInvitationRepository;
pub use repository::{PostgresWorkspaceRepository, WorkspacePgPool};
