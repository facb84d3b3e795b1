//! Kanban board context: projection, live updates, and optimistic moves.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
