//! Identifier and validated scalar types for the workspace domain.

use super::WorkspaceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a workspace (top-level tenant).
    WorkspaceId
}

uuid_id! {
    /// Unique identifier for a project within a workspace.
    ProjectId
}

uuid_id! {
    /// Unique identifier for a connected source repository.
    RepositoryId
}

uuid_id! {
    /// Unique identifier for an invitation record.
    InvitationId
}

uuid_id! {
    /// Unique identifier for an API key record.
    ApiKeyId
}

/// Identifier of a user as issued by the external auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyUserId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkspaceDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(WorkspaceDomainError::EmptyUserId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the user identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short code used as the display-ID prefix, e.g. the `TM` in `TM-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Maximum short-code length.
    pub const MAX_LEN: usize = 6;

    /// Creates a validated short code, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvalidShortCode`] when the trimmed
    /// value is empty, longer than [`Self::MAX_LEN`], or contains characters
    /// other than ASCII letters and digits.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkspaceDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();
        let is_valid = !normalized.is_empty()
            && normalized.len() <= Self::MAX_LEN
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(WorkspaceDomainError::InvalidShortCode(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the short code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
