//! Task context: identity allocation, content, audit trail, and persistence.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
