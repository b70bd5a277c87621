//! Course model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    pub department: String,
}

impl Course {
    /// Label used in selection lists, e.g. `Data Structures (CS201)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.course_name, self.course_code)
    }
}

/// Course fields embedded in a joined exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: Uuid,
    pub course_code: String,
    pub course_name: String,
}
