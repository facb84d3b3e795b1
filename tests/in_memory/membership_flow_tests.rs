//! Workspace onboarding flows: invitations, roles, and expiry sweeps.

use crate::in_memory::helpers::{BoxError, Stack, runtime};
use norbot::workspace::domain::{MemberRole, UserId};
use norbot::workspace::services::InvitationError;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn accepted_invitation_enrolls_the_user(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let invitation = rt.block_on(stack.invitations.invite(
        &stack.founder,
        stack.workspace.id(),
        "dev@acme.example",
        MemberRole::Member,
    ))?;

    let joiner = UserId::new("dev")?;
    let membership = rt.block_on(
        stack
            .invitations
            .accept(invitation.token().as_str(), joiner.clone()),
    )?;
    assert_eq!(membership.role(), MemberRole::Member);

    let role = rt.block_on(
        stack
            .memberships
            .member_role(stack.workspace.id(), &joiner),
    )?;
    assert_eq!(role, Some(MemberRole::Member));
    Ok(())
}

#[rstest]
fn invitation_tokens_are_single_use(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let invitation = rt.block_on(stack.invitations.invite(
        &stack.founder,
        stack.workspace.id(),
        "dev@acme.example",
        MemberRole::Member,
    ))?;
    let token = invitation.token().as_str().to_owned();
    rt.block_on(stack.invitations.accept(&token, UserId::new("dev")?))?;

    let replay = rt.block_on(stack.invitations.accept(&token, UserId::new("imposter")?));

    assert!(replay.is_err());
    let role = rt.block_on(
        stack
            .memberships
            .member_role(stack.workspace.id(), &UserId::new("imposter")?),
    )?;
    assert!(role.is_none());
    Ok(())
}

#[rstest]
fn outsiders_cannot_invite(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let outsider = UserId::new("outsider")?;

    let denied = rt.block_on(stack.invitations.invite(
        &outsider,
        stack.workspace.id(),
        "friend@acme.example",
        MemberRole::Admin,
    ));

    assert!(matches!(
        denied,
        Err(InvitationError::NotAuthorized { .. })
    ));
    Ok(())
}

#[rstest]
fn enrolled_member_sees_the_board_through_a_key(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let stack = Stack::bootstrap(&rt)?;
    let invitation = rt.block_on(stack.invitations.invite(
        &stack.founder,
        stack.workspace.id(),
        "dev@acme.example",
        MemberRole::Member,
    ))?;
    rt.block_on(
        stack
            .invitations
            .accept(invitation.token().as_str(), UserId::new("dev")?),
    )?;

    let issued = rt.block_on(stack.keys.issue(stack.project.id(), "dev laptop"))?;
    let listed = rt.block_on(
        stack
            .dispatch
            .dispatch(&issued.secret, serde_json::json!({ "action": "list" })),
    );

    assert!(listed.get("columns").is_some());
    Ok(())
}
