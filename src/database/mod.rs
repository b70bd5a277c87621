//! Database module
//!
//! This module is the data access layer over the hosted store

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{StoreClient, StoreQuery};
pub use repositories::{StudentRepository, CourseRepository, ExamRepository, ResultRepository};
pub use service::DatabaseService;
