//! Adapter implementations of workspace ports.

pub mod memory;
pub mod postgres;
