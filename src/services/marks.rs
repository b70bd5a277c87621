//! Mark entry service implementation
//!
//! One result at a time is upserted for a (student, exam) pair. After a
//! successful submit the exam, marks and grade are reset while the student
//! and course stay selected, so several exams can be entered for one student
//! in a row.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::DatabaseService;
use crate::models::{Course, Exam, Grade, ResultWithDetails, Student, UpsertResultRequest};
use crate::state::{CancelHandle, Snapshot, ViewScope};
use crate::utils::errors::{ExamResultsError, Result};
use crate::utils::logging::{log_mutation, log_validation_failure};

pub const VIEW: &str = "enter_marks";

pub const MISSING_FIELDS: &str = "Please fill in all required fields";
pub const MARKS_OUT_OF_RANGE: &str = "Marks must be between 0 and 100";
pub const INVALID_SELECTION: &str = "Invalid student or exam selection";

pub const MIN_MARKS: f64 = 0.0;
pub const MAX_MARKS: f64 = 100.0;

/// Current state of the mark entry form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkEntryForm {
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub exam_id: Option<Uuid>,
    /// Marks as typed by the operator
    pub marks: String,
    pub grade: Grade,
}

impl MarkEntryForm {
    fn reset_after_submit(&mut self) {
        self.exam_id = None;
        self.marks.clear();
        self.grade = Grade::default();
    }
}

/// A form that passed validation, with its selections resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMark {
    pub student: Student,
    pub exam: Exam,
    pub marks: f64,
    pub grade: Grade,
}

impl ValidatedMark {
    pub fn request(&self) -> UpsertResultRequest {
        UpsertResultRequest {
            student_id: self.student.id,
            exam_id: self.exam.id,
            marks_obtained: self.marks,
            grade: self.grade,
        }
    }
}

/// Parse typed marks, accepting 0 to 100 inclusive
pub fn parse_marks(input: &str) -> Result<f64> {
    let marks: f64 = input
        .trim()
        .parse()
        .map_err(|_| ExamResultsError::validation(MARKS_OUT_OF_RANGE))?;

    if !marks.is_finite() || !(MIN_MARKS..=MAX_MARKS).contains(&marks) {
        return Err(ExamResultsError::validation(MARKS_OUT_OF_RANGE));
    }

    Ok(marks)
}

/// Validate a form against the loaded student and exam snapshots.
///
/// Checks run in order: required fields, marks range, then that the
/// selections still resolve.
pub fn validate_mark_entry(form: &MarkEntryForm, students: &[Student], exams: &[Exam]) -> Result<ValidatedMark> {
    let (Some(student_id), Some(exam_id)) = (form.student_id, form.exam_id) else {
        return Err(ExamResultsError::validation(MISSING_FIELDS));
    };
    if form.marks.trim().is_empty() {
        return Err(ExamResultsError::validation(MISSING_FIELDS));
    }

    let marks = parse_marks(&form.marks)?;

    let student = students.iter().find(|s| s.id == student_id);
    let exam = exams.iter().find(|e| e.id == exam_id);
    let (Some(student), Some(exam)) = (student, exam) else {
        return Err(ExamResultsError::validation(INVALID_SELECTION));
    };

    Ok(ValidatedMark {
        student: student.clone(),
        exam: exam.clone(),
        marks,
        grade: form.grade,
    })
}

/// Enter marks view
#[derive(Debug)]
pub struct MarkEntryService {
    db: DatabaseService,
    scope: ViewScope,
    students: Snapshot<Vec<Student>>,
    courses: Snapshot<Vec<Course>>,
    exams: Snapshot<Vec<Exam>>,
    results: Snapshot<Vec<ResultWithDetails>>,
    form: MarkEntryForm,
}

impl MarkEntryService {
    pub fn new(db: DatabaseService) -> Self {
        Self {
            db,
            scope: ViewScope::new(VIEW),
            students: Snapshot::new("students"),
            courses: Snapshot::new("courses"),
            exams: Snapshot::new("exams"),
            results: Snapshot::new("results"),
            form: MarkEntryForm::default(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    /// Fetch every collection the form draws from
    pub async fn load(&mut self) -> Result<()> {
        let (students, courses, exams, results) = futures::join!(
            self.students.load(&self.scope, self.db.students.list_ordered_by_name()),
            self.courses.load(&self.scope, self.db.courses.list_ordered_by_code()),
            self.exams.load(&self.scope, self.db.exams.list_ordered_by_date()),
            self.results.load(&self.scope, self.db.results.list_with_details())
        );
        students.and(courses).and(exams).and(results)
    }

    pub fn students(&self) -> &[Student] {
        self.students.data()
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.data()
    }

    pub fn results(&self) -> &Snapshot<Vec<ResultWithDetails>> {
        &self.results
    }

    /// Fetch errors to show as a banner
    pub fn errors(&self) -> Vec<&str> {
        [
            self.students.error(),
            self.courses.error(),
            self.exams.error(),
            self.results.error(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn form(&self) -> &MarkEntryForm {
        &self.form
    }

    /// Exams of the selected course; empty until a course is chosen
    pub fn exams_for_course(&self) -> Vec<&Exam> {
        match self.form.course_id {
            Some(course_id) => self
                .exams
                .data()
                .iter()
                .filter(|exam| exam.course_id == course_id)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn select_student(&mut self, student_id: Option<Uuid>) {
        self.form.student_id = student_id;
    }

    /// Select a course; an exam of another course is deselected
    pub fn select_course(&mut self, course_id: Option<Uuid>) {
        self.form.course_id = course_id;

        let exam_still_valid = match (self.form.exam_id, course_id) {
            (Some(exam_id), Some(course_id)) => self
                .exams
                .data()
                .iter()
                .any(|exam| exam.id == exam_id && exam.course_id == course_id),
            _ => false,
        };
        if !exam_still_valid {
            self.form.exam_id = None;
        }
    }

    /// Select an exam of the selected course
    pub fn select_exam(&mut self, exam_id: Option<Uuid>) -> Result<()> {
        if let Some(id) = exam_id {
            if !self.exams_for_course().iter().any(|exam| exam.id == id) {
                return Err(ExamResultsError::validation(INVALID_SELECTION));
            }
        }
        self.form.exam_id = exam_id;
        Ok(())
    }

    pub fn set_marks(&mut self, marks: impl Into<String>) {
        self.form.marks = marks.into();
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.form.grade = grade;
    }

    /// Validate the current form without sending anything
    pub fn validate(&self) -> Result<ValidatedMark> {
        validate_mark_entry(&self.form, self.students.data(), self.exams.data())
    }

    /// Upsert the result, reset the per-exam fields and re-fetch results.
    /// Returns the success message.
    pub async fn submit(&mut self) -> Result<String> {
        let validated = self.validate().inspect_err(|e| {
            log_validation_failure(VIEW, &e.to_string());
        })?;

        debug!(
            student_id = %validated.student.id,
            exam_id = %validated.exam.id,
            marks = validated.marks,
            "Submitting result"
        );
        let stored = self.scope.run(self.db.results.upsert(validated.request())).await?;
        log_mutation("result", "upsert", Some(&stored.id.to_string()));
        info!(result_id = %stored.id, "Result recorded");

        self.form.reset_after_submit();

        if let Err(e) = self
            .results
            .load(&self.scope, self.db.results.list_with_details())
            .await
        {
            warn!(error = %e, "Result refresh after upsert failed");
        }

        Ok(format!(
            "Marks recorded for {} in {}",
            validated.student.full_name, validated.exam.exam_type
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn student() -> Student {
        Student {
            id: Uuid::from_u128(1),
            stud_id: 1,
            roll_no: "R1".to_string(),
            full_name: "Ann Lee".to_string(),
            department: "CSE".to_string(),
            semester: 3,
            email: None,
        }
    }

    fn exam() -> Exam {
        Exam {
            id: Uuid::from_u128(2),
            exam_id: 1,
            course_id: Uuid::from_u128(3),
            exam_type: "Midterm".to_string(),
            exam_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            max_marks: 100.0,
        }
    }

    fn form(marks: &str) -> MarkEntryForm {
        MarkEntryForm {
            student_id: Some(student().id),
            course_id: Some(exam().course_id),
            exam_id: Some(exam().id),
            marks: marks.to_string(),
            grade: Grade::B,
        }
    }

    #[test]
    fn test_boundaries_accepted() {
        assert_eq!(parse_marks("0").unwrap(), 0.0);
        assert_eq!(parse_marks("100").unwrap(), 100.0);
        assert_eq!(parse_marks(" 72.5 ").unwrap(), 72.5);
    }

    #[test]
    fn test_out_of_range_rejected() {
        for input in ["100.5", "-1", "abc", "NaN", "inf"] {
            assert_matches!(
                parse_marks(input),
                Err(ExamResultsError::Validation(msg)) if msg == MARKS_OUT_OF_RANGE,
                "input {:?} should be rejected", input
            );
        }
    }

    #[test]
    fn test_missing_exam_reported_first() {
        let mut form = form("");
        form.exam_id = None;
        assert_matches!(
            validate_mark_entry(&form, &[student()], &[exam()]),
            Err(ExamResultsError::Validation(msg)) if msg == MISSING_FIELDS
        );
    }

    #[test]
    fn test_missing_marks_reported() {
        assert_matches!(
            validate_mark_entry(&form("  "), &[student()], &[exam()]),
            Err(ExamResultsError::Validation(msg)) if msg == MISSING_FIELDS
        );
    }

    #[test]
    fn test_unresolved_selection_rejected() {
        assert_matches!(
            validate_mark_entry(&form("50"), &[], &[exam()]),
            Err(ExamResultsError::Validation(msg)) if msg == INVALID_SELECTION
        );
    }

    #[test]
    fn test_valid_form_resolves_selection() {
        let validated = validate_mark_entry(&form("88"), &[student()], &[exam()]).unwrap();
        assert_eq!(validated.marks, 88.0);
        let request = validated.request();
        assert_eq!(request.student_id, student().id);
        assert_eq!(request.exam_id, exam().id);
        assert_eq!(request.grade, Grade::B);
    }

    #[test]
    fn test_reset_keeps_student_and_course() {
        let mut form = form("88");
        form.reset_after_submit();
        assert_eq!(form.student_id, Some(student().id));
        assert_eq!(form.course_id, Some(exam().course_id));
        assert_eq!(form.exam_id, None);
        assert!(form.marks.is_empty());
        assert_eq!(form.grade, Grade::A);
    }
}
