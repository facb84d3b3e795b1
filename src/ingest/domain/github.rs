//! Inbound GitHub issue imports.

use super::IngestDomainError;

/// A GitHub issue to import as a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubIssueImport {
    issue_number: u64,
    url: String,
    title: String,
    description: Option<String>,
    labels: Vec<String>,
}

impl GithubIssueImport {
    /// Creates a validated import request.
    ///
    /// # Errors
    ///
    /// Returns [`IngestDomainError::EmptyIssueTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        issue_number: u64,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, IngestDomainError> {
        let raw = title.into();
        let title = raw.trim().to_owned();
        if title.is_empty() {
            return Err(IngestDomainError::EmptyIssueTitle);
        }
        Ok(Self {
            issue_number,
            url: url.into(),
            title,
            description: None,
            labels: Vec::new(),
        })
    }

    /// Sets the issue body as the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an issue label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn issue_number(&self) -> u64 {
        self.issue_number
    }

    /// Returns the canonical issue URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue body, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the issue labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
