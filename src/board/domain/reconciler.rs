//! Optimistic reconciliation of board moves awaiting server confirmation.

use super::projection::Board;
use crate::task::domain::{Task, TaskId, TaskStatus};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised when staging board moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardReconcileError {
    /// The task is not part of the confirmed snapshot.
    #[error("task not on the board: {0}")]
    UnknownTask(TaskId),
}

/// A staged move that the server has not yet confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingIntent {
    /// Task being moved.
    pub task_id: TaskId,
    /// Column the move targets.
    pub target: TaskStatus,
    /// Confirmed status to fall back to on rejection.
    pub confirmed: TaskStatus,
}

/// One task as the reconciled board shows it.
#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    task: Task,
    status: TaskStatus,
    unconfirmed: bool,
}

impl BoardEntry {
    /// Returns the underlying task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the status the entry is displayed under.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether the displayed status is a staged, unconfirmed move.
    #[must_use]
    pub const fn unconfirmed(&self) -> bool {
        self.unconfirmed
    }
}

/// Reconciles a confirmed task snapshot with staged optimistic moves.
///
/// Holds at most one pending intent per task; staging a second move for the
/// same task supersedes the first while keeping the confirmed fallback. A
/// rejection drops the intent so the task snaps back to its confirmed column.
#[derive(Debug, Clone, Default)]
pub struct BoardReconciler {
    confirmed: Vec<Task>,
    pending: HashMap<TaskId, PendingIntent>,
}

impl BoardReconciler {
    /// Creates an empty reconciler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reconciler seeded with a confirmed snapshot.
    #[must_use]
    pub fn from_snapshot(tasks: Vec<Task>) -> Self {
        Self {
            confirmed: tasks,
            pending: HashMap::new(),
        }
    }

    /// Replaces the confirmed snapshot.
    ///
    /// Intents whose target the snapshot now confirms are dropped, as are
    /// intents for tasks no longer present. Other intents stay staged with
    /// their fallback updated to the new confirmed status.
    pub fn apply_snapshot(&mut self, tasks: Vec<Task>) {
        self.confirmed = tasks;
        let confirmed: HashMap<TaskId, TaskStatus> = self
            .confirmed
            .iter()
            .map(|task| (task.id(), task.status()))
            .collect();
        self.pending.retain(|task_id, intent| {
            confirmed.get(task_id).is_some_and(|status| {
                intent.confirmed = *status;
                intent.target != *status
            })
        });
    }

    /// Stages an optimistic move.
    ///
    /// # Errors
    ///
    /// Returns [`BoardReconcileError::UnknownTask`] when the task is not in
    /// the confirmed snapshot.
    pub fn stage(
        &mut self,
        task_id: TaskId,
        target: TaskStatus,
    ) -> Result<PendingIntent, BoardReconcileError> {
        let confirmed = self
            .confirmed
            .iter()
            .find(|task| task.id() == task_id)
            .map(Task::status)
            .ok_or(BoardReconcileError::UnknownTask(task_id))?;
        let intent = PendingIntent {
            task_id,
            target,
            confirmed,
        };
        self.pending.insert(task_id, intent);
        Ok(intent)
    }

    /// Marks a staged move as confirmed by the server.
    ///
    /// Returns the intent that was pending, if any.
    pub fn confirm(&mut self, task_id: TaskId) -> Option<PendingIntent> {
        let intent = self.pending.remove(&task_id)?;
        if let Some(task) = self
            .confirmed
            .iter_mut()
            .find(|task| task.id() == task_id)
        {
            *task = task.clone().with_status(intent.target);
        }
        Some(intent)
    }

    /// Drops a staged move after server rejection.
    ///
    /// The task falls back to its confirmed column. Returns the rejected
    /// intent, if one was pending.
    pub fn reject(&mut self, task_id: TaskId) -> Option<PendingIntent> {
        self.pending.remove(&task_id)
    }

    /// Returns the pending intent for a task, if any.
    #[must_use]
    pub fn pending_for(&self, task_id: TaskId) -> Option<&PendingIntent> {
        self.pending.get(&task_id)
    }

    /// Returns the number of staged, unconfirmed moves.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns the reconciled entries: confirmed tasks with staged moves
    /// overlaid. Entries whose effective status is cancelled are omitted.
    #[must_use]
    pub fn entries(&self) -> Vec<BoardEntry> {
        self.confirmed
            .iter()
            .filter_map(|task| {
                let intent = self.pending.get(&task.id());
                let status = intent.map_or(task.status(), |intent| intent.target);
                if status.is_cancelled() {
                    return None;
                }
                Some(BoardEntry {
                    task: task.clone(),
                    status,
                    unconfirmed: intent.is_some(),
                })
            })
            .collect()
    }

    /// Projects the reconciled entries onto a board.
    #[must_use]
    pub fn view(&self) -> Board {
        let tasks = self
            .entries()
            .into_iter()
            .map(|entry| {
                let status = entry.status;
                entry.task.with_status(status)
            })
            .collect();
        Board::project(tasks)
    }
}
