//! Shared helpers for `PostgreSQL` integration tests.
//!
//! The schema is created once per process; tests isolate themselves by
//! allocating fresh workspace UUIDs and unique short codes instead of
//! truncating between cases.

use std::io;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use norbot::task::adapters::postgres::TaskPgPool;
use norbot::task::domain::{
    DisplayId, Task, TaskContent, TaskIdentity, TaskNumber, TaskStatus, TaskTitle,
};
use norbot::workspace::domain::{ShortCode, Workspace, WorkspaceId};
use once_cell::sync::OnceCell;
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Boxed error for test signatures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "NORBOT_TEST_DATABASE_URL";

/// SQL to create the base schema for tests.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-08-20-000000_create_base_tables/up.sql");

const RESET_SQL: &str = "
    DROP TABLE IF EXISTS processed_slack_events CASCADE;
    DROP TABLE IF EXISTS task_activity CASCADE;
    DROP TABLE IF EXISTS tasks CASCADE;
    DROP TABLE IF EXISTS counters CASCADE;
    DROP TABLE IF EXISTS api_keys CASCADE;
    DROP TABLE IF EXISTS invitations CASCADE;
    DROP TABLE IF EXISTS workspace_members CASCADE;
    DROP TABLE IF EXISTS projects CASCADE;
    DROP TABLE IF EXISTS workspaces CASCADE;
";

static POOL: OnceCell<Option<TaskPgPool>> = OnceCell::new();

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Returns the shared pool, or `None` when no test database is configured.
///
/// The first caller resets and recreates the schema.
///
/// # Errors
///
/// Returns an error when the pool cannot be built or the schema cannot be
/// applied.
pub fn pool() -> Result<Option<TaskPgPool>, BoxError> {
    POOL.get_or_try_init(|| {
        let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
            return Ok(None);
        };
        let manager = ConnectionManager::<PgConnection>::new(url);
        let pool = Pool::builder().max_size(4).build(manager)?;
        let mut connection = pool.get()?;
        connection.batch_execute(RESET_SQL)?;
        connection.batch_execute(CREATE_SCHEMA_SQL)?;
        Ok(Some(pool))
    })
    .cloned()
}

/// Returns a short code unlikely to collide with other tests in the run.
///
/// # Errors
///
/// Returns an error when the derived code fails validation.
pub fn unique_short_code() -> Result<ShortCode, BoxError> {
    let hex = Uuid::new_v4().simple().to_string();
    let code: String = hex.chars().take(6).collect();
    Ok(ShortCode::new(code)?)
}

/// Builds a workspace with a unique short code.
///
/// # Errors
///
/// Returns an error when validation fails.
pub fn unique_workspace() -> Result<Workspace, BoxError> {
    Ok(Workspace::new(
        "Integration",
        unique_short_code()?,
        &DefaultClock,
    )?)
}

/// Builds a backlog task owned by the given workspace.
///
/// # Errors
///
/// Returns an error when validation fails.
pub fn backlog_task(
    workspace_id: WorkspaceId,
    code: &ShortCode,
    number: u64,
    title: &str,
) -> Result<Task, BoxError> {
    let task_number = TaskNumber::new(number)?;
    Ok(Task::new(
        TaskIdentity {
            workspace_id,
            project_id: None,
            repository_id: None,
            task_number,
            display_id: DisplayId::derive(code, task_number),
        },
        TaskContent::new(TaskTitle::new(title)?),
        TaskStatus::Backlog,
        &DefaultClock,
    ))
}
