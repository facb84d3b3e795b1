//! In-memory adapters for task persistence and counter allocation.

mod counter;
mod task;

pub use counter::InMemoryCounterAllocator;
pub use task::InMemoryTaskRepository;
