//! Integration tests for the processed-event store adapter.

use std::io;

use norbot::ingest::adapters::postgres::PostgresProcessedEventStore;
use norbot::ingest::domain::SlackEventTs;
use norbot::ingest::ports::ProcessedEventStore;
use norbot::workspace::adapters::postgres::PostgresWorkspaceRepository;
use norbot::workspace::ports::WorkspaceRepository;
use rstest::rstest;
use tokio::runtime::Runtime;

use super::helpers::{self, BoxError, runtime};

#[rstest]
fn only_the_first_claim_succeeds(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let store = PostgresProcessedEventStore::new(pool);

    let workspace = helpers::unique_workspace()?;
    rt.block_on(workspaces.store_workspace(&workspace))?;
    let event = SlackEventTs::try_from("1726000000.000100")?;

    let first = rt.block_on(store.claim(workspace.id(), &event))?;
    let second = rt.block_on(store.claim(workspace.id(), &event))?;

    assert!(first);
    assert!(!second);
    Ok(())
}

#[rstest]
fn claims_are_scoped_per_workspace(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let workspaces = PostgresWorkspaceRepository::new(pool.clone());
    let store = PostgresProcessedEventStore::new(pool);

    let here = helpers::unique_workspace()?;
    let there = helpers::unique_workspace()?;
    rt.block_on(workspaces.store_workspace(&here))?;
    rt.block_on(workspaces.store_workspace(&there))?;
    let event = SlackEventTs::try_from("1726000000.000200")?;

    assert!(rt.block_on(store.claim(here.id(), &event))?);
    assert!(rt.block_on(store.claim(there.id(), &event))?);
    Ok(())
}
