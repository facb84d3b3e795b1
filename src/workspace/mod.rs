//! Workspace tenancy for Norbot.
//!
//! Workspaces are top-level tenants (one per connected Slack team) holding
//! projects, members, pending invitations, and project-scoped API keys.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
