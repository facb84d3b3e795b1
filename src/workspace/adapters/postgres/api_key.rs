//! `PostgreSQL` repository implementation for API key storage.

use super::{models::ApiKeyRow, repository::WorkspacePgPool, schema::api_keys};
use crate::workspace::{
    domain::{ApiKey, ApiKeyId, PersistedApiKeyData, ProjectId},
    ports::{ApiKeyRepository, ApiKeyRepositoryError, ApiKeyRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed API key repository.
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: WorkspacePgPool,
}

impl PostgresApiKeyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkspacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ApiKeyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ApiKeyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ApiKeyRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ApiKeyRepositoryError::persistence)?
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn store(&self, key: &ApiKey) -> ApiKeyRepositoryResult<()> {
        let key_id = key.id();
        let row = key_to_row(key);
        self.run_blocking(move |connection| {
            diesel::insert_into(api_keys::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ApiKeyRepositoryError::DuplicateKey(key_id)
                    }
                    _ => ApiKeyRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_digest(&self, digest: &str) -> ApiKeyRepositoryResult<Option<ApiKey>> {
        let digest_value = digest.to_owned();
        self.run_blocking(move |connection| {
            let row = api_keys::table
                .filter(api_keys::digest.eq(&digest_value))
                .select(ApiKeyRow::as_select())
                .first::<ApiKeyRow>(connection)
                .optional()
                .map_err(ApiKeyRepositoryError::persistence)?;
            Ok(row.map(row_to_key))
        })
        .await
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> ApiKeyRepositoryResult<Vec<ApiKey>> {
        self.run_blocking(move |connection| {
            let rows = api_keys::table
                .filter(api_keys::project_id.eq(project_id.into_inner()))
                .order(api_keys::created_at.asc())
                .select(ApiKeyRow::as_select())
                .load::<ApiKeyRow>(connection)
                .map_err(ApiKeyRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_key).collect())
        })
        .await
    }

    async fn revoke(&self, id: ApiKeyId) -> ApiKeyRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(api_keys::table.filter(api_keys::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(ApiKeyRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ApiKeyRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn key_to_row(key: &ApiKey) -> ApiKeyRow {
    ApiKeyRow {
        id: key.id().into_inner(),
        project_id: key.project_id().into_inner(),
        label: key.label().to_owned(),
        digest: key.digest().to_owned(),
        display_prefix: key.display_prefix().to_owned(),
        created_at: key.created_at(),
    }
}

fn row_to_key(row: ApiKeyRow) -> ApiKey {
    ApiKey::from_persisted(PersistedApiKeyData {
        id: ApiKeyId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        label: row.label,
        digest: row.digest,
        display_prefix: row.display_prefix,
        created_at: row.created_at,
    })
}
