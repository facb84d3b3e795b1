//! Domain model for inbound Slack events and GitHub imports.

mod error;
mod github;
mod slack;

pub use error::IngestDomainError;
pub use github::GithubIssueImport;
pub use slack::{ExtractedTask, SlackEventTs, SlackMessage};
