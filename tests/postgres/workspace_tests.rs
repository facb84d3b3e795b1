//! Integration tests for the workspace persistence adapter.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use norbot::workspace::adapters::postgres::{
    PostgresApiKeyRepository, PostgresInvitationRepository, PostgresWorkspaceRepository,
};
use norbot::workspace::domain::{
    Invitation, InvitationStatus, MemberRole, Membership, Project, UserId,
};
use norbot::workspace::ports::{InvitationRepository, WorkspaceRepository};
use norbot::workspace::services::ApiKeyService;
use rstest::rstest;
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::helpers::{self, BoxError, runtime};

#[rstest]
fn workspace_round_trips(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let repository = PostgresWorkspaceRepository::new(pool);

    let workspace = helpers::unique_workspace()?;
    rt.block_on(repository.store_workspace(&workspace))?;

    let loaded = rt
        .block_on(repository.find_workspace(workspace.id()))?
        .ok_or("stored workspace should be found")?;
    assert_eq!(loaded.id(), workspace.id());
    assert_eq!(loaded.name(), workspace.name());
    assert_eq!(loaded.short_code(), workspace.short_code());
    Ok(())
}

#[rstest]
fn project_round_trips(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let repository = PostgresWorkspaceRepository::new(pool);

    let workspace = helpers::unique_workspace()?;
    rt.block_on(repository.store_workspace(&workspace))?;
    let project = Project::new(
        workspace.id(),
        "Web",
        helpers::unique_short_code()?,
        &DefaultClock,
    )?;
    rt.block_on(repository.store_project(&project))?;

    let loaded = rt
        .block_on(repository.find_project(project.id()))?
        .ok_or("stored project should be found")?;
    assert_eq!(loaded.workspace_id(), workspace.id());
    assert_eq!(loaded.short_code(), project.short_code());
    Ok(())
}

#[rstest]
fn membership_upsert_overwrites_role(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let repository = PostgresWorkspaceRepository::new(pool);

    let workspace = helpers::unique_workspace()?;
    rt.block_on(repository.store_workspace(&workspace))?;
    let user = UserId::new(format!("user-{}", Uuid::new_v4()))?;

    let member = Membership::new(
        workspace.id(),
        user.clone(),
        MemberRole::Member,
        &DefaultClock,
    );
    rt.block_on(repository.upsert_membership(&member))?;
    let promoted = Membership::new(
        workspace.id(),
        user.clone(),
        MemberRole::Admin,
        &DefaultClock,
    );
    rt.block_on(repository.upsert_membership(&promoted))?;

    let role = rt.block_on(repository.member_role(workspace.id(), &user))?;
    assert_eq!(role, Some(MemberRole::Admin));
    Ok(())
}

#[rstest]
fn invitations_round_trip_by_token(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let invitations = PostgresInvitationRepository::new(pool);

    let workspace = helpers::unique_workspace()?;
    rt.block_on(workspaces.store_workspace(&workspace))?;
    let mut invitation = Invitation::issue(
        workspace.id(),
        "dev@acme.example",
        MemberRole::Member,
        &DefaultClock,
    )?;
    rt.block_on(invitations.store(&invitation))?;

    let found = rt
        .block_on(invitations.find_by_token(invitation.token()))?
        .ok_or("stored invitation should be found by token")?;
    assert_eq!(found.status(), InvitationStatus::Pending);

    invitation.accept(&DefaultClock)?;
    rt.block_on(invitations.update(&invitation))?;
    let accepted = rt
        .block_on(invitations.find_by_token(invitation.token()))?
        .ok_or("accepted invitation should still be found")?;
    assert_eq!(accepted.status(), InvitationStatus::Accepted);

    let pending = rt.block_on(invitations.pending_for_workspace(workspace.id()))?;
    assert!(pending.is_empty());
    Ok(())
}

#[rstest]
fn api_keys_authenticate_by_digest(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = Arc::new(PostgresWorkspaceRepository::new(pool.clone()));
    let keys = Arc::new(PostgresApiKeyRepository::new(pool));
    let service = ApiKeyService::new(keys, Arc::clone(&workspaces), Arc::new(DefaultClock));

    let workspace = helpers::unique_workspace()?;
    rt.block_on(workspaces.store_workspace(&workspace))?;
    let project = Project::new(
        workspace.id(),
        "Web",
        helpers::unique_short_code()?,
        &DefaultClock,
    )?;
    rt.block_on(workspaces.store_project(&project))?;

    let issued = rt.block_on(service.issue(project.id(), "ci runner"))?;
    let authenticated = rt
        .block_on(service.authenticate(&issued.secret))?
        .ok_or("issued key should authenticate")?;
    assert_eq!(authenticated.project_id(), project.id());
    assert_eq!(authenticated.display_prefix(), issued.record.display_prefix());

    rt.block_on(service.revoke(issued.record.id()))?;
    let after_revoke = rt.block_on(service.authenticate(&issued.secret))?;
    assert!(after_revoke.is_none());
    Ok(())
}

#[rstest]
fn removing_a_membership_clears_the_role(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let repository = PostgresWorkspaceRepository::new(pool);

    let workspace = helpers::unique_workspace()?;
    rt.block_on(repository.store_workspace(&workspace))?;
    let user = UserId::new(format!("user-{}", Uuid::new_v4()))?;
    let member = Membership::new(
        workspace.id(),
        user.clone(),
        MemberRole::Member,
        &DefaultClock,
    );
    rt.block_on(repository.upsert_membership(&member))?;

    rt.block_on(repository.remove_membership(workspace.id(), &user))?;

    let role = rt.block_on(repository.member_role(workspace.id(), &user))?;
    assert_eq!(role, None);
    Ok(())
}
