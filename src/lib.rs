//! Exam Results
//!
//! Terminal front-end for recording and analysing student exam results.
//! The library provides the data store client, the domain views (dashboard,
//! student roster, mark entry, exam analysis) and their terminal presentation.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ExamResultsError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, StoreClient};
pub use services::ServiceFactory;
pub use state::{CancelHandle, ViewScope};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
