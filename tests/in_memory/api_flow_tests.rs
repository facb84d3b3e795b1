//! External API flows: key issuance, dispatch, and revocation.

use crate::in_memory::helpers::{BoxError, Stack, runtime};
use rstest::rstest;
use serde_json::{Value, json};
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn issued_key_drives_a_full_round_trip(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let issued = rt.block_on(stack.keys.issue(stack.project.id(), "ci"))?;

    let created = rt.block_on(stack.dispatch.dispatch(
        &issued.secret,
        json!({ "action": "create", "title": "Fix login timeout", "priority": "high" }),
    ));
    assert_eq!(
        created
            .get("task")
            .and_then(|task| task.get("display_id"))
            .and_then(Value::as_str),
        Some("WEB-1")
    );

    let moved = rt.block_on(stack.dispatch.dispatch(
        &issued.secret,
        json!({ "action": "status", "display_id": "WEB-1", "status": "in_review" }),
    ));
    assert_eq!(
        moved
            .get("task")
            .and_then(|task| task.get("status"))
            .and_then(Value::as_str),
        Some("in_review")
    );

    let listed = rt.block_on(
        stack
            .dispatch
            .dispatch(&issued.secret, json!({ "action": "list" })),
    );
    assert_eq!(
        listed
            .get("stats")
            .and_then(|stats| stats.get("total"))
            .and_then(Value::as_u64),
        Some(1)
    );
    Ok(())
}

#[rstest]
fn revoked_keys_stop_authenticating(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let issued = rt.block_on(stack.keys.issue(stack.project.id(), "ci"))?;
    rt.block_on(stack.keys.revoke(issued.record.id()))?;

    let response = rt.block_on(
        stack
            .dispatch
            .dispatch(&issued.secret, json!({ "action": "list" })),
    );

    assert_eq!(response, json!({ "error": "invalid api key" }));
    Ok(())
}

#[rstest]
fn key_scope_hides_other_projects(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let ops = rt.block_on(
        stack
            .memberships
            .create_project(stack.workspace.id(), "Ops", "OPS"),
    )?;
    let web_key = rt.block_on(stack.keys.issue(stack.project.id(), "web-ci"))?;
    let ops_key = rt.block_on(stack.keys.issue(ops.id(), "ops-ci"))?;

    rt.block_on(stack.dispatch.dispatch(
        &ops_key.secret,
        json!({ "action": "create", "title": "Rotate pager" }),
    ));

    let listed = rt.block_on(
        stack
            .dispatch
            .dispatch(&web_key.secret, json!({ "action": "list" })),
    );
    assert_eq!(
        listed
            .get("stats")
            .and_then(|stats| stats.get("total"))
            .and_then(Value::as_u64),
        Some(0)
    );

    let denied = rt.block_on(stack.dispatch.dispatch(
        &web_key.secret,
        json!({ "action": "status", "display_id": "OPS-1", "status": "done" }),
    ));
    assert_eq!(denied, json!({ "error": "unknown task: OPS-1" }));
    Ok(())
}
