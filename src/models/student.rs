//! Student model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    /// Numeric identifier assigned by the store
    pub stud_id: i64,
    pub roll_no: String,
    pub full_name: String,
    pub department: String,
    pub semester: u8,
    pub email: Option<String>,
}

/// Student fields embedded in a joined result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: Uuid,
    pub full_name: String,
    pub roll_no: String,
    pub stud_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub roll_no: String,
    pub full_name: String,
    pub department: String,
    pub semester: u8,
    pub email: Option<String>,
}
