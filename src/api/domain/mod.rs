//! Domain model for the external API surface.

mod action;

pub use action::TaskAction;
