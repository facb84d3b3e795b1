//! Integration tests for the task persistence adapter.

use mockable::DefaultClock;
use norbot::task::adapters::postgres::PostgresTaskRepository;
use norbot::task::domain::{ActivityEntry, ActivityType, TaskFilter, TaskId, TaskStatus};
use norbot::task::ports::{TaskRepository, TaskRepositoryError};
use norbot::workspace::adapters::postgres::PostgresWorkspaceRepository;
use norbot::workspace::ports::WorkspaceRepository;
use norbot::workspace::domain::Workspace;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

use super::helpers::{self, BoxError, runtime};

fn seed_workspace(
    rt: &Runtime,
    repository: &PostgresWorkspaceRepository,
) -> Result<Workspace, BoxError> {
    let workspace = helpers::unique_workspace()?;
    rt.block_on(repository.store_workspace(&workspace))?;
    Ok(workspace)
}

#[rstest]
fn stored_tasks_load_by_id_and_display_id(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let repository = PostgresTaskRepository::new(pool);

    let workspace = seed_workspace(&rt, &workspaces)?;
    let task = helpers::backlog_task(workspace.id(), workspace.short_code(), 1, "Ship it")?;
    rt.block_on(repository.store(&task))?;

    let by_id = rt
        .block_on(repository.find_by_id(task.id()))?
        .ok_or("stored task should be found by id")?;
    assert_eq!(by_id.display_id(), task.display_id());
    assert_eq!(by_id.title().as_str(), "Ship it");
    assert_eq!(by_id.status(), TaskStatus::Backlog);

    let by_display = rt
        .block_on(repository.find_by_display_id(task.display_id()))?
        .ok_or("stored task should be found by display id")?;
    assert_eq!(by_display.id(), task.id());
    Ok(())
}

#[rstest]
fn duplicate_display_ids_are_rejected(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let repository = PostgresTaskRepository::new(pool);

    let workspace = seed_workspace(&rt, &workspaces)?;
    let first = helpers::backlog_task(workspace.id(), workspace.short_code(), 1, "First")?;
    let rival = helpers::backlog_task(workspace.id(), workspace.short_code(), 1, "Rival")?;
    rt.block_on(repository.store(&first))?;

    let result = rt.block_on(repository.store(&rival));
    assert!(matches!(
        result,
        Err(TaskRepositoryError::DuplicateDisplayId(ref id)) if id == first.display_id()
    ));
    Ok(())
}

#[rstest]
fn updating_a_missing_task_reports_not_found(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let repository = PostgresTaskRepository::new(pool);

    let workspace = seed_workspace(&rt, &workspaces)?;
    let phantom = helpers::backlog_task(workspace.id(), workspace.short_code(), 9, "Phantom")?;

    let result = rt.block_on(repository.update(&phantom));
    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == phantom.id()
    ));
    Ok(())
}

#[rstest]
fn updates_overwrite_status_and_survive_reload(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let repository = PostgresTaskRepository::new(pool);

    let workspace = seed_workspace(&rt, &workspaces)?;
    let mut task = helpers::backlog_task(workspace.id(), workspace.short_code(), 1, "Move me")?;
    rt.block_on(repository.store(&task))?;

    task.set_status(TaskStatus::Done, &DefaultClock);
    rt.block_on(repository.update(&task))?;

    let loaded = rt
        .block_on(repository.find_by_id(task.id()))?
        .ok_or("updated task should be found")?;
    assert_eq!(loaded.status(), TaskStatus::Done);
    assert!(loaded.completed_at().is_some());
    Ok(())
}

#[rstest]
fn listing_respects_workspace_scope_and_order(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let repository = PostgresTaskRepository::new(pool);

    let ours = seed_workspace(&rt, &workspaces)?;
    let theirs = seed_workspace(&rt, &workspaces)?;
    for (number, title) in [(1, "One"), (2, "Two"), (3, "Three")] {
        let task = helpers::backlog_task(ours.id(), ours.short_code(), number, title)?;
        rt.block_on(repository.store(&task))?;
    }
    let foreign = helpers::backlog_task(theirs.id(), theirs.short_code(), 1, "Elsewhere")?;
    rt.block_on(repository.store(&foreign))?;

    let listed = rt.block_on(repository.list(&TaskFilter::workspace(ours.id())))?;
    assert_eq!(listed.len(), 3);
    let numbers: Vec<u64> = listed
        .iter()
        .map(|task| task.task_number().value())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    Ok(())
}

#[rstest]
fn activity_appends_and_loads_in_order(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let repository = PostgresTaskRepository::new(pool);

    let workspace = seed_workspace(&rt, &workspaces)?;
    let task = helpers::backlog_task(workspace.id(), workspace.short_code(), 1, "Audited")?;
    rt.block_on(repository.store(&task))?;

    let created = ActivityEntry::record(task.id(), ActivityType::Created, None, None, &DefaultClock);
    let moved = ActivityEntry::record(
        task.id(),
        ActivityType::StatusChanged,
        Some("backlog".to_owned()),
        Some("todo".to_owned()),
        &DefaultClock,
    );
    rt.block_on(repository.append_activity(&created))?;
    rt.block_on(repository.append_activity(&moved))?;

    let entries = rt.block_on(repository.activity_for_task(task.id()))?;
    assert_eq!(entries.len(), 2);
    let first = entries.first().ok_or("first entry should exist")?;
    let last = entries.last().ok_or("last entry should exist")?;
    assert_eq!(first.activity_type(), ActivityType::Created);
    assert_eq!(last.activity_type(), ActivityType::StatusChanged);
    assert_eq!(last.after(), Some("todo"));

    let unrelated = rt.block_on(repository.activity_for_task(TaskId::new()))?;
    assert!(unrelated.is_empty());
    Ok(())
}
