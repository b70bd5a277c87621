//! Exam model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::course::CourseSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub exam_id: i64,
    pub course_id: Uuid,
    /// Free-text label such as "Midterm"
    pub exam_type: String,
    pub exam_date: NaiveDate,
    pub max_marks: f64,
}

impl Exam {
    /// Label used in selection lists, e.g. `Midterm (50 marks) - 2024-03-01`
    pub fn label(&self) -> String {
        format!("{} ({} marks) - {}", self.exam_type, self.max_marks, self.exam_date)
    }
}

/// Exam fields embedded in a joined result row, with the owning course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSummary {
    pub id: Uuid,
    pub exam_type: Option<String>,
    pub exam_date: Option<NaiveDate>,
    pub max_marks: Option<f64>,
    pub course_id: Uuid,
    pub course: Option<CourseSummary>,
}
