//! State management module
//!
//! This module handles per-view snapshots and view-lifetime cancellation

pub mod scope;
pub mod snapshot;

// Re-export commonly used state components
pub use scope::{CancelHandle, ViewScope};
pub use snapshot::{LoadState, Snapshot};
