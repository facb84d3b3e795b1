//! In-memory task repository for tests and services.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ActivityEntry, DisplayId, Task, TaskFilter, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Creation order is preserved by an explicit insertion log so board
/// projections see stable column ordering.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
    display_index: HashMap<String, TaskId>,
    activity: HashMap<TaskId, Vec<ActivityEntry>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let display_key = task.display_id().as_str().to_owned();
        if state.display_index.contains_key(&display_key) {
            return Err(TaskRepositoryError::DuplicateDisplayId(
                task.display_id().clone(),
            ));
        }
        state.display_index.insert(display_key, task.id());
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_display_id(
        &self,
        display_id: &DisplayId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let task = state
            .display_index
            .get(display_id.as_str())
            .and_then(|task_id| state.tasks.get(task_id))
            .cloned();
        Ok(task)
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|task_id| state.tasks.get(task_id))
            .filter(|task| task.matches(filter))
            .cloned()
            .collect())
    }

    async fn append_activity(&self, entry: &ActivityEntry) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .activity
            .entry(entry.task_id())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn activity_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<ActivityEntry>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.activity.get(&task_id).cloned().unwrap_or_default())
    }
}
