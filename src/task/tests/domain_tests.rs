//! Unit tests for task domain rules.

use crate::task::domain::{
    AgentExecution, DisplayId, Task, TaskContent, TaskDomainError, TaskFilter, TaskIdentity,
    TaskNumber, TaskSource, TaskStatus, TaskTitle,
};
use crate::workspace::domain::{ProjectId, RepositoryId, ShortCode, WorkspaceId};
use mockable::DefaultClock;
use rstest::rstest;

fn identity(workspace_id: WorkspaceId, number: u64) -> TaskIdentity {
    let code = ShortCode::new("TM").expect("short code should validate");
    let task_number = TaskNumber::new(number).expect("task number should validate");
    TaskIdentity {
        workspace_id,
        project_id: None,
        repository_id: None,
        task_number,
        display_id: DisplayId::derive(&code, task_number),
    }
}

fn backlog_task(workspace_id: WorkspaceId, number: u64) -> Task {
    let title = TaskTitle::new("Fix login timeout").expect("title should validate");
    Task::new(
        identity(workspace_id, number),
        TaskContent::new(title),
        TaskStatus::Backlog,
        &DefaultClock,
    )
}

#[rstest]
#[case(0)]
#[case(u64::MAX)]
fn out_of_range_task_numbers_are_rejected(#[case] value: u64) {
    assert!(matches!(
        TaskNumber::new(value),
        Err(TaskDomainError::InvalidTaskNumber(_))
    ));
}

#[rstest]
fn display_id_concatenates_code_and_number() {
    let code = ShortCode::new("web").expect("short code should validate");
    let number = TaskNumber::new(123).expect("task number should validate");
    assert_eq!(DisplayId::derive(&code, number).as_str(), "WEB-123");
}

#[rstest]
#[case("TM-1")]
#[case("ACME42-9001")]
fn well_formed_display_ids_parse(#[case] input: &str) {
    let parsed = DisplayId::try_from(input).expect("display id should parse");
    assert_eq!(parsed.as_str(), input);
}

#[rstest]
#[case("")]
#[case("TM")]
#[case("TM-")]
#[case("-123")]
#[case("TM-12-3")]
#[case("tm-12")]
#[case("TM-12a")]
fn malformed_display_ids_are_rejected(#[case] input: &str) {
    assert!(matches!(
        DisplayId::try_from(input),
        Err(TaskDomainError::InvalidDisplayId(_))
    ));
}

#[rstest]
fn new_task_starts_without_completion() {
    let task = backlog_task(WorkspaceId::new(), 1);
    assert_eq!(task.status(), TaskStatus::Backlog);
    assert!(task.completed_at().is_none());
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn entering_done_stamps_completed_at() {
    let mut task = backlog_task(WorkspaceId::new(), 1);
    task.set_status(TaskStatus::Done, &DefaultClock);
    assert_eq!(task.completed_at(), Some(task.updated_at()));
}

#[rstest]
#[case(TaskStatus::Backlog)]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::Cancelled)]
fn leaving_done_clears_completed_at(#[case] target: TaskStatus) {
    let mut task = backlog_task(WorkspaceId::new(), 1);
    task.set_status(TaskStatus::Done, &DefaultClock);
    let change = task.set_status(target, &DefaultClock);
    assert_eq!(change.from, TaskStatus::Done);
    assert_eq!(change.to, target);
    assert!(task.completed_at().is_none());
}

#[rstest]
fn any_status_may_overwrite_any_other() {
    let mut task = backlog_task(WorkspaceId::new(), 1);
    task.set_status(TaskStatus::Cancelled, &DefaultClock);
    let change = task.set_status(TaskStatus::InReview, &DefaultClock);
    assert_eq!(change.from, TaskStatus::Cancelled);
    assert_eq!(task.status(), TaskStatus::InReview);
}

#[rstest]
fn labels_are_deduplicated() {
    let mut task = backlog_task(WorkspaceId::new(), 1);
    task.add_label("auth", &DefaultClock);
    task.add_label("auth", &DefaultClock);
    assert_eq!(task.labels(), ["auth".to_owned()]);
}

#[rstest]
fn filter_narrows_by_repository_and_project() {
    let workspace_id = WorkspaceId::new();
    let repository_id = RepositoryId::new();
    let project_id = ProjectId::new();

    let wide = TaskFilter::workspace(workspace_id);
    assert!(wide.matches(workspace_id, Some(repository_id), None));
    assert!(!wide.matches(WorkspaceId::new(), None, None));

    let narrow = TaskFilter::workspace(workspace_id)
        .with_repository(repository_id)
        .with_project(project_id);
    assert!(narrow.matches(workspace_id, Some(repository_id), Some(project_id)));
    assert!(!narrow.matches(workspace_id, None, Some(project_id)));
    assert!(!narrow.matches(workspace_id, Some(repository_id), None));
}

#[rstest]
fn slack_source_exposes_its_message_ts() {
    let source = TaskSource::Slack {
        channel_id: "C01".to_owned(),
        message_ts: "1726000000.000100".to_owned(),
        thread_ts: None,
        permalink: None,
    };
    assert_eq!(source.slack_message_ts(), Some("1726000000.000100"));
    assert_eq!(TaskSource::Manual.slack_message_ts(), None);
}

#[rstest]
fn agent_execution_walks_the_happy_path() {
    let execution = AgentExecution::request(&DefaultClock)
        .start(&DefaultClock)
        .expect("pending execution should start")
        .complete(Some("opened PR #7".to_owned()), &DefaultClock)
        .expect("running execution should complete");
    assert_eq!(execution.status_str(), "completed");
}

#[rstest]
fn agent_execution_rejects_skipping_ahead() {
    let pending = AgentExecution::request(&DefaultClock);
    let skipped = pending.complete(None, &DefaultClock);
    assert!(skipped.is_err());
}

#[rstest]
fn serialized_source_is_tagged() {
    let source = TaskSource::Github {
        issue_number: 42,
        url: "https://github.com/acme/web/issues/42".to_owned(),
    };
    let value = serde_json::to_value(&source).expect("source should serialize");
    assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("github"));
    let back: TaskSource = serde_json::from_value(value).expect("source should deserialize");
    assert_eq!(back, source);
}
