//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{ActivityRow, TaskRow},
    schema::{task_activity, tasks},
};
use crate::task::{
    domain::{
        ActivityEntry, ActivityId, ActivityType, DisplayId, PersistedTaskData, Task, TaskContent,
        TaskFilter, TaskId, TaskIdentity, TaskNumber, TaskPriority, TaskStatus, TaskTitle,
        TaskType,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::workspace::domain::{ProjectId, RepositoryId, WorkspaceId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let display_id = task.display_id().clone();
        let row = task_to_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_display_id_unique_violation(info.as_ref()) =>
                    {
                        TaskRepositoryError::DuplicateDisplayId(display_id.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;
        self.run_blocking(move |connection| {
            let updated =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set(&row)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_display_id(
        &self,
        display_id: &DisplayId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let lookup = display_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::display_id.eq(&lookup))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let filter = *filter;
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::workspace_id.eq(filter.workspace_id.into_inner()))
                .into_boxed();
            if let Some(repository_id) = filter.repository_id {
                query = query.filter(tasks::repository_id.eq(repository_id.into_inner()));
            }
            if let Some(project_id) = filter.project_id {
                query = query.filter(tasks::project_id.eq(project_id.into_inner()));
            }
            let rows = query
                .order((tasks::created_at.asc(), tasks::task_number.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn append_activity(&self, entry: &ActivityEntry) -> TaskRepositoryResult<()> {
        let row = activity_to_row(entry);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_activity::table)
                .values(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn activity_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<ActivityEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_activity::table
                .filter(task_activity::task_id.eq(task_id.into_inner()))
                .order(task_activity::recorded_at.asc())
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_activity).collect()
        })
        .await
    }
}

fn task_to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let task_number =
        i64::try_from(task.task_number().value()).map_err(TaskRepositoryError::persistence)?;
    let source = serde_json::to_value(task.source()).map_err(TaskRepositoryError::persistence)?;
    let labels = serde_json::to_value(task.labels()).map_err(TaskRepositoryError::persistence)?;
    let attachments =
        serde_json::to_value(task.attachments()).map_err(TaskRepositoryError::persistence)?;
    let code_context = task
        .code_context()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let extraction = task
        .extraction()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let agent_execution = task
        .agent_execution()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let github_link = task
        .github_link()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(TaskRow {
        id: task.id().into_inner(),
        workspace_id: task.workspace_id().into_inner(),
        project_id: task.project_id().map(ProjectId::into_inner),
        repository_id: task.repository_id().map(RepositoryId::into_inner),
        task_number,
        display_id: task.display_id().as_str().to_owned(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        task_type: task.task_type().as_str().to_owned(),
        source,
        assignee: task.assignee().map(ToOwned::to_owned),
        labels,
        code_context,
        attachments,
        extraction,
        agent_execution,
        github_link,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let task_number = u64::try_from(row.task_number)
        .map_err(TaskRepositoryError::persistence)
        .and_then(|value| TaskNumber::new(value).map_err(TaskRepositoryError::persistence))?;
    let identity = TaskIdentity {
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        project_id: row.project_id.map(ProjectId::from_uuid),
        repository_id: row.repository_id.map(RepositoryId::from_uuid),
        task_number,
        display_id: DisplayId::try_from(row.display_id.as_str())
            .map_err(TaskRepositoryError::persistence)?,
    };
    let content = TaskContent {
        title: TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?,
        description: row.description,
        priority: TaskPriority::try_from(row.priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        task_type: TaskType::try_from(row.task_type.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        source: serde_json::from_value(row.source).map_err(TaskRepositoryError::persistence)?,
        assignee: row.assignee,
        labels: serde_json::from_value(row.labels).map_err(TaskRepositoryError::persistence)?,
        code_context: row
            .code_context
            .map(serde_json::from_value)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        attachments: serde_json::from_value(row.attachments)
            .map_err(TaskRepositoryError::persistence)?,
        extraction: row
            .extraction
            .map(serde_json::from_value)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
    };
    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        identity,
        content,
        status: TaskStatus::try_from(row.status.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        agent_execution: row
            .agent_execution
            .map(serde_json::from_value)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        github_link: row
            .github_link
            .map(serde_json::from_value)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
        completed_at: row.completed_at,
    };
    Ok(Task::from_persisted(data))
}

fn activity_to_row(entry: &ActivityEntry) -> ActivityRow {
    ActivityRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        activity_type: entry.activity_type().as_str().to_owned(),
        before_value: entry.before().map(ToOwned::to_owned),
        after_value: entry.after().map(ToOwned::to_owned),
        recorded_at: entry.recorded_at(),
    }
}

fn row_to_activity(row: ActivityRow) -> TaskRepositoryResult<ActivityEntry> {
    let activity_type = ActivityType::try_from(row.activity_type.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    Ok(ActivityEntry::from_persisted(
        ActivityId::from_uuid(row.id),
        TaskId::from_uuid(row.task_id),
        activity_type,
        row.before_value,
        row.after_value,
        row.recorded_at,
    ))
}

fn is_display_id_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_tasks_display_id_unique")
}
