//! Invitation tokens: single-use, expiring entry passes into a workspace.

use super::{
    InvitationId, MemberRole, ParseInvitationStatusError, WorkspaceDomainError, WorkspaceId,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque 32-character alphanumeric invitation token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationToken(String);

impl InvitationToken {
    /// Required token length.
    pub const LEN: usize = 32;

    /// Generates a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for InvitationToken {
    type Error = WorkspaceDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let is_valid =
            value.len() == Self::LEN && value.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(WorkspaceDomainError::InvalidInvitationToken);
        }
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for InvitationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invitation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Issued and awaiting acceptance.
    Pending,
    /// Redeemed by the invited user.
    Accepted,
    /// Marked expired by an explicit sweep.
    Expired,
    /// Withdrawn by an admin.
    Cancelled,
}

impl InvitationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for InvitationStatus {
    type Error = ParseInvitationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "expired" => Ok(Self::Expired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseInvitationStatusError(value.to_owned())),
        }
    }
}

/// Single-use workspace invitation with a seven-day acceptance window.
///
/// Acceptance past the deadline fails with
/// [`WorkspaceDomainError::InvitationExpired`] and leaves the status
/// `pending`; only the explicit [`Invitation::expire`] transition records the
/// expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    workspace_id: WorkspaceId,
    token: InvitationToken,
    invited_email: String,
    role: MemberRole,
    status: InvitationStatus,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInvitationData {
    /// Persisted invitation identifier.
    pub id: InvitationId,
    /// Workspace the invitation grants entry to.
    pub workspace_id: WorkspaceId,
    /// Persisted token value.
    pub token: InvitationToken,
    /// Invited email address.
    pub invited_email: String,
    /// Role granted on acceptance.
    pub role: MemberRole,
    /// Persisted lifecycle status.
    pub status: InvitationStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted acceptance deadline.
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Acceptance window measured from issuance.
    pub const VALIDITY_DAYS: i64 = 7;

    /// Issues a new pending invitation with a freshly generated token.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyEmail`] when the email is empty
    /// after trimming.
    pub fn issue(
        workspace_id: WorkspaceId,
        invited_email: impl Into<String>,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Result<Self, WorkspaceDomainError> {
        let raw = invited_email.into();
        let email = raw.trim();
        if email.is_empty() {
            return Err(WorkspaceDomainError::EmptyEmail);
        }
        let created_at = clock.utc();
        Ok(Self {
            id: InvitationId::new(),
            workspace_id,
            token: InvitationToken::generate(),
            invited_email: email.to_owned(),
            role,
            status: InvitationStatus::Pending,
            created_at,
            expires_at: created_at + Duration::days(Self::VALIDITY_DAYS),
        })
    }

    /// Reconstructs an invitation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInvitationData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            token: data.token,
            invited_email: data.invited_email,
            role: data.role,
            status: data.status,
            created_at: data.created_at,
            expires_at: data.expires_at,
        }
    }

    /// Returns the invitation identifier.
    #[must_use]
    pub const fn id(&self) -> InvitationId {
        self.id
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the invitation token.
    #[must_use]
    pub const fn token(&self) -> &InvitationToken {
        &self.token
    }

    /// Returns the invited email address.
    #[must_use]
    pub fn invited_email(&self) -> &str {
        &self.invited_email
    }

    /// Returns the role granted on acceptance.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> InvitationStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the acceptance deadline.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Redeems the invitation.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvitationNotPending`] when the
    /// invitation has already been redeemed, cancelled, or swept, and
    /// [`WorkspaceDomainError::InvitationExpired`] when the deadline has
    /// passed. An expired acceptance attempt does not change the status.
    pub fn accept(&mut self, clock: &impl Clock) -> Result<(), WorkspaceDomainError> {
        self.ensure_pending()?;
        if clock.utc() > self.expires_at {
            return Err(WorkspaceDomainError::InvitationExpired(self.id));
        }
        self.status = InvitationStatus::Accepted;
        Ok(())
    }

    /// Marks an overdue pending invitation as expired.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvitationNotPending`] when the
    /// invitation is not pending. A pending invitation still inside its
    /// window is left untouched and reported as not expired.
    pub fn expire(&mut self, clock: &impl Clock) -> Result<bool, WorkspaceDomainError> {
        self.ensure_pending()?;
        if clock.utc() <= self.expires_at {
            return Ok(false);
        }
        self.status = InvitationStatus::Expired;
        Ok(true)
    }

    /// Withdraws the invitation.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvitationNotPending`] when the
    /// invitation is not pending.
    pub fn cancel(&mut self) -> Result<(), WorkspaceDomainError> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Cancelled;
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), WorkspaceDomainError> {
        if self.status == InvitationStatus::Pending {
            Ok(())
        } else {
            Err(WorkspaceDomainError::InvitationNotPending {
                id: self.id,
                status: self.status.as_str(),
            })
        }
    }
}
