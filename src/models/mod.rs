//! Data models module
//!
//! This module contains the records mirrored from the four store collections

pub mod student;
pub mod course;
pub mod exam;
pub mod result;

// Re-export commonly used models
pub use student::{Student, StudentSummary, CreateStudentRequest};
pub use course::{Course, CourseSummary};
pub use exam::{Exam, ExamSummary};
pub use result::{Grade, ExamResult, ResultWithDetails, UpsertResultRequest};
