//! Kanban board projection over a task collection.

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use serde::Serialize;

/// One kanban column holding the tasks in a single status.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl BoardColumn {
    const fn empty(status: TaskStatus) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    /// Returns the status this column displays.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the tasks in the column, in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Per-priority task counts across the visible board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
}

impl PriorityCounts {
    fn bump(&mut self, priority: TaskPriority) {
        match priority {
            TaskPriority::Critical => self.critical += 1,
            TaskPriority::High => self.high += 1,
            TaskPriority::Medium => self.medium += 1,
            TaskPriority::Low => self.low += 1,
        }
    }

    /// Returns the count for one priority.
    #[must_use]
    pub const fn of(&self, priority: TaskPriority) -> usize {
        match priority {
            TaskPriority::Critical => self.critical,
            TaskPriority::High => self.high,
            TaskPriority::Medium => self.medium,
            TaskPriority::Low => self.low,
        }
    }
}

/// Aggregate statistics for the visible board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    total: usize,
    by_priority: PriorityCounts,
}

impl BoardStats {
    /// Returns the number of visible tasks. Always equals the sum of the
    /// column sizes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the per-priority breakdown.
    #[must_use]
    pub const fn by_priority(&self) -> PriorityCounts {
        self.by_priority
    }
}

/// Kanban projection: the five visible columns in fixed order plus stats.
///
/// Cancelled tasks are excluded entirely; they appear in no column and in no
/// statistic.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    columns: Vec<BoardColumn>,
    stats: BoardStats,
}

impl Board {
    /// Projects a task collection onto the board.
    ///
    /// Column order is fixed regardless of input order; tasks keep their
    /// relative order within each column.
    #[must_use]
    pub fn project(tasks: Vec<Task>) -> Self {
        let mut columns: Vec<BoardColumn> = TaskStatus::BOARD_COLUMNS
            .iter()
            .map(|status| BoardColumn::empty(*status))
            .collect();
        let mut by_priority = PriorityCounts::default();
        for task in tasks {
            if task.status().is_cancelled() {
                continue;
            }
            if let Some(column) = columns
                .iter_mut()
                .find(|column| column.status == task.status())
            {
                by_priority.bump(task.priority());
                column.tasks.push(task);
            }
        }
        let total = columns.iter().map(|column| column.tasks.len()).sum();
        Self {
            columns,
            stats: BoardStats { total, by_priority },
        }
    }

    /// Returns the columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns one column by status. Cancelled has no column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }

    /// Returns the board statistics.
    #[must_use]
    pub const fn stats(&self) -> BoardStats {
        self.stats
    }
}
