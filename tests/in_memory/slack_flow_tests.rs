//! Slack ingestion flows: event to board, redelivery, and GitHub import.

use crate::in_memory::helpers::{BoxError, Stack, runtime};
use norbot::ingest::domain::{ExtractedTask, GithubIssueImport, SlackEventTs, SlackMessage};
use norbot::task::domain::{ExtractionMetadata, TaskFilter, TaskPriority, TaskStatus};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn message(ts: &str) -> Result<SlackMessage, BoxError> {
    let event_ts = SlackEventTs::try_from(ts)?;
    Ok(SlackMessage::new("C042", event_ts)?
        .with_permalink("https://acme.slack.com/archives/C042/p1726000000000100"))
}

fn candidate(title: &str) -> Result<ExtractedTask, BoxError> {
    let extraction = ExtractionMetadata::new("claude-sonnet-4", 90)?;
    Ok(ExtractedTask::new(title, extraction))
}

#[rstest]
fn slack_event_lands_on_the_board(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;

    let created = rt
        .block_on(stack.slack.ingest(
            stack.workspace.id(),
            Some(stack.project.id()),
            &message("1726000000.000100")?,
            vec![
                candidate("Fix login timeout")?.with_priority(TaskPriority::High),
                candidate("Add retry budget")?,
            ],
        ))?
        .ok_or("first delivery should create tasks")?;

    let ids: Vec<_> = created
        .iter()
        .map(|task| task.display_id().as_str().to_owned())
        .collect();
    assert_eq!(ids, ["WEB-1", "WEB-2"]);

    let board = rt.block_on(
        stack
            .kanban
            .board(&TaskFilter::workspace(stack.workspace.id()).with_project(stack.project.id())),
    )?;
    assert_eq!(board.stats().total(), 2);
    let backlog = board
        .column(TaskStatus::Backlog)
        .ok_or("backlog column should exist")?;
    assert_eq!(backlog.tasks().len(), 2);
    Ok(())
}

#[rstest]
fn redelivered_slack_event_changes_nothing(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let delivery = message("1726000000.000100")?;

    rt.block_on(stack.slack.ingest(
        stack.workspace.id(),
        None,
        &delivery,
        vec![candidate("Fix login timeout")?],
    ))?;
    let redelivered = rt.block_on(stack.slack.ingest(
        stack.workspace.id(),
        None,
        &delivery,
        vec![candidate("Fix login timeout")?],
    ))?;

    assert!(redelivered.is_none());
    let listed = rt.block_on(
        stack
            .tasks
            .list(&TaskFilter::workspace(stack.workspace.id())),
    )?;
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[rstest]
fn workspace_and_project_counters_stay_separate(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;

    let loose = rt
        .block_on(stack.slack.ingest(
            stack.workspace.id(),
            None,
            &message("1726000000.000100")?,
            vec![candidate("Workspace scoped")?],
        ))?
        .ok_or("delivery should create tasks")?;
    let scoped = rt
        .block_on(stack.slack.ingest(
            stack.workspace.id(),
            Some(stack.project.id()),
            &message("1726000000.000200")?,
            vec![candidate("Project scoped")?],
        ))?
        .ok_or("delivery should create tasks")?;

    assert_eq!(
        loose.first().map(|task| task.display_id().as_str()),
        Some("TM-1")
    );
    assert_eq!(
        scoped.first().map(|task| task.display_id().as_str()),
        Some("WEB-1")
    );
    Ok(())
}

#[rstest]
fn github_issue_import_keeps_its_back_link(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let import = GithubIssueImport::new(42, "https://github.com/acme/web/issues/42", "Crash")?
        .with_label("bug");

    let task = rt.block_on(stack.github.import(
        stack.workspace.id(),
        Some(stack.project.id()),
        None,
        import,
    ))?;

    assert_eq!(task.display_id().as_str(), "WEB-1");
    let link = task.github_link().ok_or("back-link should be recorded")?;
    assert_eq!(link.issue_number(), 42);
    let board = rt.block_on(
        stack
            .kanban
            .board(&TaskFilter::workspace(stack.workspace.id())),
    )?;
    assert_eq!(board.stats().total(), 1);
    Ok(())
}
