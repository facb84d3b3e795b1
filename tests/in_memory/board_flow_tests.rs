//! Board flows: projection over the task store and optimistic move
//! reconciliation against fresh snapshots.

use crate::in_memory::helpers::{BoxError, Stack, runtime};
use norbot::board::domain::BoardReconciler;
use norbot::board::services::{FeedEvent, TaskChangeKind};
use norbot::task::domain::{Task, TaskFilter, TaskStatus};
use norbot::task::services::CreateTaskRequest;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn create(rt: &Runtime, stack: &Stack, title: &str) -> Result<Task, BoxError> {
    Ok(rt.block_on(
        stack
            .tasks
            .create(CreateTaskRequest::new(stack.workspace.id(), title)),
    )?)
}

#[rstest]
fn moves_are_reflected_in_the_next_board(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let task = create(&rt, &stack, "Fix login timeout")?;
    rt.block_on(stack.tasks.update_status(task.id(), TaskStatus::InProgress))?;

    let board = rt.block_on(
        stack
            .kanban
            .board(&TaskFilter::workspace(stack.workspace.id())),
    )?;

    let in_progress = board
        .column(TaskStatus::InProgress)
        .ok_or("column should exist")?;
    assert_eq!(in_progress.tasks().len(), 1);
    let backlog = board
        .column(TaskStatus::Backlog)
        .ok_or("column should exist")?;
    assert!(backlog.tasks().is_empty());
    Ok(())
}

#[rstest]
fn cancelled_tasks_leave_the_board_but_not_the_store(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let kept = create(&rt, &stack, "Kept")?;
    let dropped = create(&rt, &stack, "Dropped")?;
    rt.block_on(stack.tasks.update_status(dropped.id(), TaskStatus::Cancelled))?;

    let filter = TaskFilter::workspace(stack.workspace.id());
    let board = rt.block_on(stack.kanban.board(&filter))?;
    let listed = rt.block_on(stack.tasks.list(&filter))?;

    assert_eq!(board.stats().total(), 1);
    assert_eq!(listed.len(), 2);
    assert_eq!(
        board
            .column(TaskStatus::Backlog)
            .and_then(|column| column.tasks().first())
            .map(Task::id),
        Some(kept.id())
    );
    Ok(())
}

#[rstest]
fn confirmed_drag_survives_the_next_snapshot(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let task = create(&rt, &stack, "Drag me")?;
    let filter = TaskFilter::workspace(stack.workspace.id());

    let mut reconciler =
        BoardReconciler::from_snapshot(rt.block_on(stack.tasks.list(&filter))?);
    reconciler.stage(task.id(), TaskStatus::InProgress)?;
    assert!(
        reconciler
            .pending_for(task.id())
            .is_some_and(|intent| intent.target == TaskStatus::InProgress)
    );

    // Server confirms the move; the refreshed snapshot satisfies the intent.
    rt.block_on(stack.tasks.update_status(task.id(), TaskStatus::InProgress))?;
    reconciler.apply_snapshot(rt.block_on(stack.tasks.list(&filter))?);

    assert_eq!(reconciler.pending_count(), 0);
    let view = reconciler.view();
    assert!(
        view.column(TaskStatus::InProgress)
            .is_some_and(|column| column.tasks().len() == 1)
    );
    Ok(())
}

#[rstest]
fn rejected_drag_snaps_back_to_the_stored_column(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let task = create(&rt, &stack, "Drag me")?;
    let filter = TaskFilter::workspace(stack.workspace.id());

    let mut reconciler =
        BoardReconciler::from_snapshot(rt.block_on(stack.tasks.list(&filter))?);
    reconciler.stage(task.id(), TaskStatus::Done)?;
    let optimistic = reconciler.view();
    assert!(
        optimistic
            .column(TaskStatus::Done)
            .is_some_and(|column| column.tasks().len() == 1)
    );

    reconciler.reject(task.id());

    let view = reconciler.view();
    assert!(
        view.column(TaskStatus::Backlog)
            .is_some_and(|column| column.tasks().len() == 1)
    );
    assert!(
        view.column(TaskStatus::Done)
            .is_some_and(|column| column.tasks().is_empty())
    );
    let stored = rt.block_on(stack.tasks.find(task.id()))?;
    assert_eq!(stored.status(), TaskStatus::Backlog);
    Ok(())
}

#[rstest]
fn feed_mirrors_the_lifecycle(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let mut subscription = stack
        .tasks
        .subscribe(TaskFilter::workspace(stack.workspace.id()));

    let task = create(&rt, &stack, "Watched")?;
    rt.block_on(stack.tasks.update_status(task.id(), TaskStatus::Done))?;

    let Some(FeedEvent::Change(created)) = subscription.try_next() else {
        return Err("creation event expected".into());
    };
    assert_eq!(created.kind, TaskChangeKind::Created);
    let Some(FeedEvent::Change(moved)) = subscription.try_next() else {
        return Err("move event expected".into());
    };
    assert_eq!(
        moved.kind,
        TaskChangeKind::StatusChanged {
            from: TaskStatus::Backlog,
            to: TaskStatus::Done,
        }
    );
    Ok(())
}
