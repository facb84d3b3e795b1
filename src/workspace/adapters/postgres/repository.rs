//! `PostgreSQL` repository implementation for workspace tenancy storage.

use super::{
    models::{MembershipRow, ProjectRow, WorkspaceRow},
    schema::{projects, workspace_members, workspaces},
};
use crate::workspace::{
    domain::{
        MemberRole, Membership, PersistedProjectData, PersistedWorkspaceData, Project, ProjectId,
        ShortCode, UserId, Workspace, WorkspaceId,
    },
    ports::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by workspace adapters.
pub type WorkspacePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workspace repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkspaceRepository {
    pool: WorkspacePgPool,
}

impl PostgresWorkspaceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkspacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkspaceRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkspaceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkspaceRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkspaceRepositoryError::persistence)?
    }
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn store_workspace(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()> {
        let workspace_id = workspace.id();
        let row = workspace_to_row(workspace);
        self.run_blocking(move |connection| {
            diesel::insert_into(workspaces::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkspaceRepositoryError::DuplicateWorkspace(workspace_id)
                    }
                    _ => WorkspaceRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_workspace(
        &self,
        id: WorkspaceId,
    ) -> WorkspaceRepositoryResult<Option<Workspace>> {
        self.run_blocking(move |connection| {
            let row = workspaces::table
                .filter(workspaces::id.eq(id.into_inner()))
                .select(WorkspaceRow::as_select())
                .first::<WorkspaceRow>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?;
            row.map(row_to_workspace).transpose()
        })
        .await
    }

    async fn store_project(&self, project: &Project) -> WorkspaceRepositoryResult<()> {
        let project_id = project.id();
        let row = project_to_row(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkspaceRepositoryError::DuplicateProject(project_id)
                    }
                    _ => WorkspaceRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> WorkspaceRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn upsert_membership(&self, membership: &Membership) -> WorkspaceRepositoryResult<()> {
        let row = membership_to_row(membership);
        self.run_blocking(move |connection| {
            diesel::insert_into(workspace_members::table)
                .values(&row)
                .on_conflict((
                    workspace_members::workspace_id,
                    workspace_members::user_id,
                ))
                .do_update()
                .set(workspace_members::role.eq(&row.role))
                .execute(connection)
                .map_err(WorkspaceRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn member_role(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> WorkspaceRepositoryResult<Option<MemberRole>> {
        let user = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let role = workspace_members::table
                .filter(workspace_members::workspace_id.eq(workspace_id.into_inner()))
                .filter(workspace_members::user_id.eq(&user))
                .select(workspace_members::role)
                .first::<String>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?;
            role.map(|value| {
                MemberRole::try_from(value.as_str())
                    .map_err(WorkspaceRepositoryError::persistence)
            })
            .transpose()
        })
        .await
    }

    async fn remove_membership(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> WorkspaceRepositoryResult<()> {
        let user = user_id.clone();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                workspace_members::table
                    .filter(workspace_members::workspace_id.eq(workspace_id.into_inner()))
                    .filter(workspace_members::user_id.eq(user.as_str())),
            )
            .execute(connection)
            .map_err(WorkspaceRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(WorkspaceRepositoryError::MemberNotFound {
                    workspace_id,
                    user_id: user,
                });
            }
            Ok(())
        })
        .await
    }
}

fn workspace_to_row(workspace: &Workspace) -> WorkspaceRow {
    WorkspaceRow {
        id: workspace.id().into_inner(),
        name: workspace.name().to_owned(),
        short_code: workspace.short_code().as_str().to_owned(),
        slack_team_id: workspace.slack_team_id().map(ToOwned::to_owned),
        created_at: workspace.created_at(),
    }
}

fn row_to_workspace(row: WorkspaceRow) -> WorkspaceRepositoryResult<Workspace> {
    let short_code =
        ShortCode::new(row.short_code).map_err(WorkspaceRepositoryError::persistence)?;
    Ok(Workspace::from_persisted(PersistedWorkspaceData {
        id: WorkspaceId::from_uuid(row.id),
        name: row.name,
        short_code,
        slack_team_id: row.slack_team_id,
        created_at: row.created_at,
    }))
}

fn project_to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().into_inner(),
        workspace_id: project.workspace_id().into_inner(),
        name: project.name().to_owned(),
        short_code: project.short_code().as_str().to_owned(),
        created_at: project.created_at(),
    }
}

fn row_to_project(row: ProjectRow) -> WorkspaceRepositoryResult<Project> {
    let short_code =
        ShortCode::new(row.short_code).map_err(WorkspaceRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        name: row.name,
        short_code,
        created_at: row.created_at,
    }))
}

fn membership_to_row(membership: &Membership) -> MembershipRow {
    MembershipRow {
        workspace_id: membership.workspace_id().into_inner(),
        user_id: membership.user_id().as_str().to_owned(),
        role: membership.role().as_str().to_owned(),
        added_at: membership.added_at(),
    }
}
