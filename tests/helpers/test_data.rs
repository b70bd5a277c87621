//! Row builders for mock store responses

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use uuid::Uuid;

/// Random full name for a student
pub fn fake_name() -> String {
    Name().fake()
}

pub fn fake_email() -> String {
    SafeEmail().fake()
}

pub fn student_row(id: Uuid, full_name: &str, roll_no: &str) -> Value {
    json!({
        "id": id,
        "stud_id": 1,
        "roll_no": roll_no,
        "full_name": full_name,
        "department": "CSE",
        "semester": 3,
        "email": null
    })
}

pub fn course_row(id: Uuid, code: &str, name: &str) -> Value {
    json!({
        "id": id,
        "course_id": 1,
        "course_code": code,
        "course_name": name,
        "credits": 4,
        "department": "CSE"
    })
}

pub fn exam_row(id: Uuid, course_id: Uuid, exam_type: &str, max_marks: f64) -> Value {
    json!({
        "id": id,
        "exam_id": 1,
        "course_id": course_id,
        "exam_type": exam_type,
        "exam_date": "2024-03-01",
        "max_marks": max_marks
    })
}

/// Stored result as returned by an upsert
pub fn result_row(student_id: Uuid, exam_id: Uuid, marks: f64, grade: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "student_id": student_id,
        "exam_id": exam_id,
        "marks_obtained": marks,
        "grade": grade
    })
}

/// A graded exam in one course, for building joined result rows
#[derive(Debug, Clone)]
pub struct ExamFixture {
    pub id: Uuid,
    pub course_id: Uuid,
    pub exam_type: String,
    pub max_marks: Option<f64>,
}

impl ExamFixture {
    pub fn new(course_id: Uuid, exam_type: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id,
            exam_type: exam_type.to_string(),
            max_marks: Some(100.0),
        }
    }

    /// Result row joined with its student and exam→course
    pub fn detailed_result(&self, student_name: &str, marks: Option<f64>, grade: Option<&str>) -> Value {
        let student_id = Uuid::new_v4();
        json!({
            "id": Uuid::new_v4(),
            "student_id": student_id,
            "exam_id": self.id,
            "marks_obtained": marks,
            "grade": grade,
            "student": {
                "id": student_id,
                "full_name": student_name,
                "roll_no": "R1",
                "stud_id": 1
            },
            "exam": {
                "id": self.id,
                "exam_type": self.exam_type,
                "exam_date": "2024-03-01",
                "max_marks": self.max_marks,
                "course_id": self.course_id,
                "course": {
                    "id": self.course_id,
                    "course_code": "CS201",
                    "course_name": "Data Structures"
                }
            }
        })
    }
}
