//! Norbot: task-management core for chat-driven engineering teams.
//!
//! This crate provides the core functionality for turning conversations into
//! tracked work: task identity and numbering, kanban-state consistency, and
//! the tenancy model those guarantees live inside.
//!
//! # Architecture
//!
//! Norbot follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`workspace`]: Tenancy, membership, invitations, and API keys
//! - [`task`]: Task identity, content, and lifecycle tracking
//! - [`board`]: Kanban projection, live change feed, and optimistic moves
//! - [`ingest`]: Inbound Slack events and GitHub issue imports
//! - [`api`]: Authenticated, project-scoped external actions

pub mod api;
pub mod board;
pub mod ingest;
pub mod task;
pub mod workspace;
