//! Workspace membership and role types.

use super::{ParseMemberRoleError, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role a user holds within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// May manage members, invitations, and workspace settings.
    Admin,
    /// May view and mutate tasks.
    Member,
}

impl MemberRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns whether the role carries administrative privileges.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ParseMemberRoleError(value.to_owned())),
        }
    }
}

/// A user's membership in a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    workspace_id: WorkspaceId,
    user_id: UserId,
    role: MemberRole,
    added_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a new membership record.
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Self {
        Self {
            workspace_id,
            user_id,
            role,
            added_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            workspace_id,
            user_id,
            role,
            added_at,
        }
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the member's role.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns when the member joined the workspace.
    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}
