//! Ingest context: inbound Slack events and GitHub issue imports.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
