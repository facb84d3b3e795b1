//! `PostgreSQL` repository implementation for invitation storage.

use super::{models::InvitationRow, repository::WorkspacePgPool, schema::invitations};
use crate::workspace::{
    domain::{
        Invitation, InvitationId, InvitationStatus, InvitationToken, MemberRole,
        PersistedInvitationData, WorkspaceId,
    },
    ports::{InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed invitation repository.
#[derive(Debug, Clone)]
pub struct PostgresInvitationRepository {
    pool: WorkspacePgPool,
}

impl PostgresInvitationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkspacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InvitationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InvitationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InvitationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InvitationRepositoryError::persistence)?
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepository {
    async fn store(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let invitation_id = invitation.id();
        let row = invitation_to_row(invitation);
        self.run_blocking(move |connection| {
            diesel::insert_into(invitations::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        InvitationRepositoryError::DuplicateInvitation(invitation_id)
                    }
                    _ => InvitationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let invitation_id = invitation.id();
        let status = invitation.status().as_str().to_owned();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                invitations::table.filter(invitations::id.eq(invitation_id.into_inner())),
            )
            .set(invitations::status.eq(status))
            .execute(connection)
            .map_err(InvitationRepositoryError::persistence)?;
            if updated == 0 {
                return Err(InvitationRepositoryError::NotFound(invitation_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_token(
        &self,
        token: &InvitationToken,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        let token_value = token.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = invitations::table
                .filter(invitations::token.eq(&token_value))
                .select(InvitationRow::as_select())
                .first::<InvitationRow>(connection)
                .optional()
                .map_err(InvitationRepositoryError::persistence)?;
            row.map(row_to_invitation).transpose()
        })
        .await
    }

    async fn pending_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> InvitationRepositoryResult<Vec<Invitation>> {
        self.run_blocking(move |connection| {
            let rows = invitations::table
                .filter(invitations::workspace_id.eq(workspace_id.into_inner()))
                .filter(invitations::status.eq(InvitationStatus::Pending.as_str()))
                .order(invitations::created_at.asc())
                .select(InvitationRow::as_select())
                .load::<InvitationRow>(connection)
                .map_err(InvitationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_invitation).collect()
        })
        .await
    }
}

fn invitation_to_row(invitation: &Invitation) -> InvitationRow {
    InvitationRow {
        id: invitation.id().into_inner(),
        workspace_id: invitation.workspace_id().into_inner(),
        token: invitation.token().as_str().to_owned(),
        invited_email: invitation.invited_email().to_owned(),
        role: invitation.role().as_str().to_owned(),
        status: invitation.status().as_str().to_owned(),
        created_at: invitation.created_at(),
        expires_at: invitation.expires_at(),
    }
}

fn row_to_invitation(row: InvitationRow) -> InvitationRepositoryResult<Invitation> {
    let token = InvitationToken::try_from(row.token.as_str())
        .map_err(InvitationRepositoryError::persistence)?;
    let role =
        MemberRole::try_from(row.role.as_str()).map_err(InvitationRepositoryError::persistence)?;
    let status = InvitationStatus::try_from(row.status.as_str())
        .map_err(InvitationRepositoryError::persistence)?;
    Ok(Invitation::from_persisted(PersistedInvitationData {
        id: InvitationId::from_uuid(row.id),
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        token,
        invited_email: row.invited_email,
        role,
        status,
        created_at: row.created_at,
        expires_at: row.expires_at,
    }))
}
