//! Board services: snapshot queries and the live change feed.

mod feed;
mod kanban;

pub use feed::{BoardFeed, BoardSubscription, FeedEvent, TaskChange, TaskChangeKind};
pub use kanban::{KanbanError, KanbanResult, KanbanService};
