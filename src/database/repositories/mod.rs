//! Database repositories module
//!
//! This module contains one repository per store collection

pub mod student;
pub mod course;
pub mod exam;
pub mod result;

// Re-export repositories
pub use student::StudentRepository;
pub use course::CourseRepository;
pub use exam::ExamRepository;
pub use result::ResultRepository;
