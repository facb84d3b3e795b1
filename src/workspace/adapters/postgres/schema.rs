//! Diesel schema for workspace tenancy persistence.

diesel::table! {
    /// Workspace tenant records.
    workspaces (id) {
        /// Workspace identifier.
        id -> Uuid,
        /// Workspace display name.
        #[max_length = 255]
        name -> Varchar,
        /// Display-ID short code.
        #[max_length = 6]
        short_code -> Varchar,
        /// Linked Slack team, if connected.
        #[max_length = 50]
        slack_team_id -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project records grouping tasks within a workspace.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Project display name.
        #[max_length = 255]
        name -> Varchar,
        /// Display-ID short code.
        #[max_length = 6]
        short_code -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership rows linking users to workspaces.
    workspace_members (workspace_id, user_id) {
        /// Workspace identifier.
        workspace_id -> Uuid,
        /// Auth-provider user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Member role.
        #[max_length = 20]
        role -> Varchar,
        /// When the member joined.
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Single-use workspace invitations.
    invitations (id) {
        /// Invitation identifier.
        id -> Uuid,
        /// Workspace the invitation grants entry to.
        workspace_id -> Uuid,
        /// 32-character alphanumeric token.
        #[max_length = 32]
        token -> Varchar,
        /// Invited email address.
        #[max_length = 255]
        invited_email -> Varchar,
        /// Role granted on acceptance.
        #[max_length = 20]
        role -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Acceptance deadline.
        expires_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project-scoped API key records (digests only, never secrets).
    api_keys (id) {
        /// Key identifier.
        id -> Uuid,
        /// Project the key is scoped to.
        project_id -> Uuid,
        /// Human-readable label.
        #[max_length = 255]
        label -> Varchar,
        /// Hex SHA-256 digest of the secret.
        #[max_length = 64]
        digest -> Varchar,
        /// Truncated secret prefix for re-display.
        #[max_length = 12]
        display_prefix -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> workspaces (workspace_id));
diesel::joinable!(invitations -> workspaces (workspace_id));
diesel::joinable!(api_keys -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(
    workspaces,
    projects,
    workspace_members,
    invitations,
    api_keys,
);
