//! Domain model for board projection and optimistic reconciliation.

mod projection;
mod reconciler;

pub use projection::{Board, BoardColumn, BoardStats, PriorityCounts};
pub use reconciler::{BoardEntry, BoardReconcileError, BoardReconciler, PendingIntent};
