//! External API context: authenticated, project-scoped task actions.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
