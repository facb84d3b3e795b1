//! Broadcast feed of task changes for live board updates.
//!
//! Publishers push every committed task mutation into the feed; subscribers
//! receive only the changes matching their board filter. A slow subscriber
//! that falls behind the channel capacity observes a lag marker instead of
//! silently missing changes, so it knows to refetch a snapshot.

use crate::task::domain::{TaskFilter, TaskId, TaskPriority, TaskStatus};
use crate::workspace::domain::{ProjectId, RepositoryId, WorkspaceId};
use serde::Serialize;
use tokio::sync::broadcast;

/// Default broadcast capacity before slow subscribers start lagging.
const DEFAULT_CAPACITY: usize = 256;

/// What changed about a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskChangeKind {
    /// A new task entered the board.
    Created,
    /// The task moved between columns.
    StatusChanged {
        /// Column the task left.
        from: TaskStatus,
        /// Column the task entered.
        to: TaskStatus,
    },
    /// The task priority was overwritten.
    PriorityChanged {
        /// Previous priority.
        from: TaskPriority,
        /// New priority.
        to: TaskPriority,
    },
    /// The assignee was set, replaced, or cleared.
    AssigneeChanged,
    /// Title, description, labels, or attachments changed.
    ContentChanged,
}

/// One committed task mutation, with the coordinates filters match against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskChange {
    /// Workspace the task belongs to.
    pub workspace_id: WorkspaceId,
    /// Project the task belongs to, if any.
    pub project_id: Option<ProjectId>,
    /// Connected repository, if any.
    pub repository_id: Option<RepositoryId>,
    /// Task that changed.
    pub task_id: TaskId,
    /// What changed.
    pub kind: TaskChangeKind,
}

impl TaskChange {
    /// Returns whether the change falls inside a subscription filter.
    #[must_use]
    pub fn matches(&self, filter: &TaskFilter) -> bool {
        filter.matches(self.workspace_id, self.repository_id, self.project_id)
    }
}

/// Event delivered to a board subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A change matching the subscription filter.
    Change(TaskChange),
    /// The subscriber fell behind and missed this many changes; the board
    /// snapshot should be refetched.
    Lagged(u64),
    /// The feed was dropped; no further changes will arrive.
    Closed,
}

/// Broadcast hub for task changes.
#[derive(Debug, Clone)]
pub struct BoardFeed {
    sender: broadcast::Sender<TaskChange>,
}

impl Default for BoardFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl BoardFeed {
    /// Creates a feed holding up to `capacity` undelivered changes per
    /// subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a change to all current subscribers.
    ///
    /// Returns the number of subscribers the change was queued for. A feed
    /// with no subscribers quietly drops the change.
    #[must_use = "the count reveals whether anybody received the change"]
    pub fn publish(&self, change: TaskChange) -> usize {
        self.sender.send(change).unwrap_or_default()
    }

    /// Opens a subscription delivering only changes matching the filter.
    ///
    /// The subscription observes changes published after this call.
    #[must_use]
    pub fn subscribe(&self, filter: TaskFilter) -> BoardSubscription {
        BoardSubscription {
            receiver: self.sender.subscribe(),
            filter,
        }
    }

    /// Returns the number of open subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A filtered view onto the board feed.
#[derive(Debug)]
pub struct BoardSubscription {
    receiver: broadcast::Receiver<TaskChange>,
    filter: TaskFilter,
}

impl BoardSubscription {
    /// Returns the filter this subscription was opened with.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Waits for the next event.
    ///
    /// Changes outside the filter are skipped without waking the caller's
    /// logic; lag and closure are always surfaced.
    pub async fn next(&mut self) -> FeedEvent {
        loop {
            match self.receiver.recv().await {
                Ok(change) if change.matches(&self.filter) => {
                    return FeedEvent::Change(change);
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    return FeedEvent::Lagged(missed);
                }
                Err(broadcast::error::RecvError::Closed) => return FeedEvent::Closed,
            }
        }
    }

    /// Returns the next event if one is already queued.
    ///
    /// Returns `None` when the feed is empty, without waiting.
    pub fn try_next(&mut self) -> Option<FeedEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(change) if change.matches(&self.filter) => {
                    return Some(FeedEvent::Change(change));
                }
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    return Some(FeedEvent::Lagged(missed));
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(FeedEvent::Closed),
            }
        }
    }
}
