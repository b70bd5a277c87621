//! Result model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exam::ExamSummary;
use super::student::StudentSummary;

/// Letter grade recorded alongside the numeric marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(format!("Unknown grade: {}", other)),
        }
    }
}

/// A result row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: Uuid,
    pub student_id: Uuid,
    pub exam_id: Uuid,
    pub marks_obtained: Option<f64>,
    pub grade: Option<Grade>,
}

/// A result row joined with its student and its exam (and the exam's course)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultWithDetails {
    pub id: Uuid,
    pub student_id: Uuid,
    pub exam_id: Uuid,
    pub marks_obtained: Option<f64>,
    pub grade: Option<Grade>,
    pub student: Option<StudentSummary>,
    pub exam: Option<ExamSummary>,
}

impl ResultWithDetails {
    /// Identity of the course the result's exam belongs to
    pub fn course_id(&self) -> Option<Uuid> {
        let exam = self.exam.as_ref()?;
        exam.course.as_ref().map(|course| course.id).or(Some(exam.course_id))
    }
}

/// Insert-or-update payload keyed by (student_id, exam_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertResultRequest {
    pub student_id: Uuid,
    pub exam_id: Uuid,
    pub marks_obtained: f64,
    pub grade: Grade,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parsing() {
        assert_eq!("b".parse::<Grade>(), Ok(Grade::B));
        assert_eq!(" F ".parse::<Grade>(), Ok(Grade::F));
        assert!("E".parse::<Grade>().is_err());
        assert_eq!(Grade::default(), Grade::A);
    }

    #[test]
    fn test_joined_row_deserialization() {
        let json = r#"{
            "id": "7d1c9a52-3f0e-4b8e-9a51-0c6f3e2b1a01",
            "student_id": "1b0e4c1e-2a7d-4f3b-8d61-5f0a9c2e7b02",
            "exam_id": "a4f5d3c2-9b8e-4a71-b6c5-d4e3f2a1b003",
            "marks_obtained": 42.5,
            "grade": "B",
            "student": {
                "id": "1b0e4c1e-2a7d-4f3b-8d61-5f0a9c2e7b02",
                "full_name": "Ann Lee",
                "roll_no": "R1",
                "stud_id": 1
            },
            "exam": {
                "id": "a4f5d3c2-9b8e-4a71-b6c5-d4e3f2a1b003",
                "exam_type": "Midterm",
                "exam_date": "2024-03-01",
                "max_marks": 50,
                "course_id": "c0c0c0c0-1111-4222-8333-444455556666",
                "course": {
                    "id": "c0c0c0c0-1111-4222-8333-444455556666",
                    "course_code": "CS201",
                    "course_name": "Data Structures"
                }
            }
        }"#;

        let row: ResultWithDetails = serde_json::from_str(json).unwrap();
        assert_eq!(row.marks_obtained, Some(42.5));
        assert_eq!(row.grade, Some(Grade::B));
        assert_eq!(row.student.as_ref().unwrap().full_name, "Ann Lee");
        assert_eq!(
            row.course_id().unwrap().to_string(),
            "c0c0c0c0-1111-4222-8333-444455556666"
        );
    }

    #[test]
    fn test_ungraded_row_deserialization() {
        let json = r#"{
            "id": "7d1c9a52-3f0e-4b8e-9a51-0c6f3e2b1a01",
            "student_id": "1b0e4c1e-2a7d-4f3b-8d61-5f0a9c2e7b02",
            "exam_id": "a4f5d3c2-9b8e-4a71-b6c5-d4e3f2a1b003",
            "marks_obtained": null,
            "grade": null,
            "student": null,
            "exam": null
        }"#;

        let row: ResultWithDetails = serde_json::from_str(json).unwrap();
        assert!(row.marks_obtained.is_none());
        assert!(row.course_id().is_none());
    }
}
