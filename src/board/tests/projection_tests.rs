//! Unit tests for the kanban board projection.

use crate::board::domain::Board;
use crate::task::domain::{
    DisplayId, Task, TaskContent, TaskIdentity, TaskNumber, TaskPriority, TaskStatus, TaskTitle,
};
use crate::workspace::domain::{ShortCode, WorkspaceId};
use mockable::DefaultClock;
use rstest::rstest;

fn task(workspace_id: WorkspaceId, number: u64, status: TaskStatus) -> Task {
    let code = ShortCode::new("TM").expect("short code should validate");
    let task_number = TaskNumber::new(number).expect("task number should validate");
    let title = TaskTitle::new(format!("Task {number}")).expect("title should validate");
    Task::new(
        TaskIdentity {
            workspace_id,
            project_id: None,
            repository_id: None,
            task_number,
            display_id: DisplayId::derive(&code, task_number),
        },
        TaskContent::new(title),
        status,
        &DefaultClock,
    )
}

#[rstest]
fn columns_keep_their_fixed_order() {
    let board = Board::project(Vec::new());
    let statuses: Vec<_> = board
        .columns()
        .iter()
        .map(crate::board::domain::BoardColumn::status)
        .collect();
    assert_eq!(statuses, TaskStatus::BOARD_COLUMNS);
    assert_eq!(board.stats().total(), 0);
}

#[rstest]
fn tasks_land_in_their_status_column() {
    let workspace_id = WorkspaceId::new();
    let board = Board::project(vec![
        task(workspace_id, 1, TaskStatus::Backlog),
        task(workspace_id, 2, TaskStatus::InProgress),
        task(workspace_id, 3, TaskStatus::InProgress),
        task(workspace_id, 4, TaskStatus::Done),
    ]);

    let in_progress = board
        .column(TaskStatus::InProgress)
        .expect("column should exist");
    assert_eq!(in_progress.tasks().len(), 2);
    assert_eq!(board.stats().total(), 4);
}

#[rstest]
fn cancelled_tasks_are_invisible() {
    let workspace_id = WorkspaceId::new();
    let board = Board::project(vec![
        task(workspace_id, 1, TaskStatus::Todo),
        task(workspace_id, 2, TaskStatus::Cancelled),
    ]);

    assert_eq!(board.stats().total(), 1);
    assert!(board.column(TaskStatus::Cancelled).is_none());
    let visible: usize = board.columns().iter().map(|column| column.tasks().len()).sum();
    assert_eq!(visible, board.stats().total());
}

#[rstest]
fn priority_counts_cover_only_visible_tasks() {
    let workspace_id = WorkspaceId::new();
    let mut urgent = task(workspace_id, 1, TaskStatus::Todo);
    urgent.set_priority(TaskPriority::Critical, &DefaultClock);
    let mut cancelled = task(workspace_id, 2, TaskStatus::Cancelled);
    cancelled.set_priority(TaskPriority::Critical, &DefaultClock);
    let board = Board::project(vec![urgent, cancelled, task(workspace_id, 3, TaskStatus::Done)]);

    let by_priority = board.stats().by_priority();
    assert_eq!(by_priority.of(TaskPriority::Critical), 1);
    assert_eq!(by_priority.of(TaskPriority::Medium), 1);
    assert_eq!(by_priority.of(TaskPriority::Low), 0);
}

#[rstest]
fn column_order_is_stable_for_input_order() {
    let workspace_id = WorkspaceId::new();
    let board = Board::project(vec![
        task(workspace_id, 1, TaskStatus::Todo),
        task(workspace_id, 2, TaskStatus::Todo),
        task(workspace_id, 3, TaskStatus::Todo),
    ]);

    let todo = board.column(TaskStatus::Todo).expect("column should exist");
    let numbers: Vec<_> = todo
        .tasks()
        .iter()
        .map(|task| task.task_number().value())
        .collect();
    assert_eq!(numbers, [1, 2, 3]);
}
