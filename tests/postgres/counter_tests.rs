//! Integration tests for the counter allocation adapter.

use std::collections::HashSet;
use std::io;

use norbot::task::adapters::postgres::PostgresCounterAllocator;
use norbot::task::ports::{CounterAllocator, CounterScope, CounterType};
use norbot::workspace::domain::{ProjectId, WorkspaceId};
use rstest::rstest;
use tokio::runtime::Runtime;

use super::helpers::{self, BoxError, runtime};

#[rstest]
fn allocations_count_up_from_one(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let allocator = PostgresCounterAllocator::new(pool);
    let scope = CounterScope::Workspace(WorkspaceId::new());

    for expected in 1..=3 {
        let number = rt.block_on(allocator.allocate_next(scope, CounterType::TaskNumber))?;
        assert_eq!(number.value(), expected);
    }
    Ok(())
}

#[rstest]
fn scopes_advance_independently(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let allocator = PostgresCounterAllocator::new(pool);
    let workspace_scope = CounterScope::Workspace(WorkspaceId::new());
    let project_scope = CounterScope::Project(ProjectId::new());

    rt.block_on(allocator.allocate_next(workspace_scope, CounterType::TaskNumber))?;
    rt.block_on(allocator.allocate_next(workspace_scope, CounterType::TaskNumber))?;
    let first_in_project =
        rt.block_on(allocator.allocate_next(project_scope, CounterType::TaskNumber))?;

    assert_eq!(first_in_project.value(), 1);
    Ok(())
}

#[rstest]
fn concurrent_allocations_never_collide(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let Some(pool) = helpers::pool()? else {
        return Ok(());
    };
    let rt = runtime?;
    let allocator = PostgresCounterAllocator::new(pool);
    let scope = CounterScope::Workspace(WorkspaceId::new());

    let numbers = rt.block_on(async {
        let mut handles = Vec::new();
        for _ in 0..8 {
            let allocator = allocator.clone();
            handles.push(tokio::spawn(async move {
                allocator.allocate_next(scope, CounterType::TaskNumber).await
            }));
        }
        let mut allocated = Vec::new();
        for handle in handles {
            allocated.push(handle.await??);
        }
        Ok::<_, BoxError>(allocated)
    })?;

    let distinct: HashSet<u64> = numbers.iter().map(|number| number.value()).collect();
    assert_eq!(distinct.len(), 8);
    assert!(distinct.contains(&1));
    assert!(distinct.contains(&8));
    Ok(())
}
