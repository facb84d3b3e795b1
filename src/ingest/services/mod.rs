//! Ingestion services for Slack events and GitHub imports.

mod github;
mod slack;

pub use github::{GithubImportError, GithubImportResult, GithubImportService};
pub use slack::{SlackIngestError, SlackIngestResult, SlackIngestService};
