//! Diesel row models for workspace tenancy persistence.

use super::schema::{api_keys, invitations, projects, workspace_members, workspaces};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query/insert row for workspace records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = workspaces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkspaceRow {
    /// Workspace identifier.
    pub id: uuid::Uuid,
    /// Workspace display name.
    pub name: String,
    /// Display-ID short code.
    pub short_code: String,
    /// Linked Slack team, if connected.
    pub slack_team_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query/insert row for project records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Project display name.
    pub name: String,
    /// Display-ID short code.
    pub short_code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query/insert row for membership records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = workspace_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    /// Workspace identifier.
    pub workspace_id: uuid::Uuid,
    /// Auth-provider user identifier.
    pub user_id: String,
    /// Member role.
    pub role: String,
    /// When the member joined.
    pub added_at: DateTime<Utc>,
}

/// Query/insert row for invitation records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvitationRow {
    /// Invitation identifier.
    pub id: uuid::Uuid,
    /// Workspace the invitation grants entry to.
    pub workspace_id: uuid::Uuid,
    /// Token value.
    pub token: String,
    /// Invited email address.
    pub invited_email: String,
    /// Role granted on acceptance.
    pub role: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Acceptance deadline.
    pub expires_at: DateTime<Utc>,
}

/// Query/insert row for API key records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = api_keys)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApiKeyRow {
    /// Key identifier.
    pub id: uuid::Uuid,
    /// Project the key is scoped to.
    pub project_id: uuid::Uuid,
    /// Human-readable label.
    pub label: String,
    /// Hex SHA-256 digest of the secret.
    pub digest: String,
    /// Truncated secret prefix for re-display.
    pub display_prefix: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
