//! Services for the external API surface.

mod dispatch;

pub use dispatch::{ApiDispatchError, ApiDispatchService};
