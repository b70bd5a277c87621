//! Exam analysis service
//!
//! Turns the joined result set into per-exam-type ranking tables with
//! summary statistics for one course.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::database::DatabaseService;
use crate::models::{Course, ResultWithDetails};
use crate::state::{CancelHandle, LoadState, Snapshot, ViewScope};
use crate::utils::errors::{ExamResultsError, Result};
use crate::utils::helpers::percentage;

pub const VIEW: &str = "exam_analysis";

/// Placeholder for a missing student name or exam type
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a missing grade
pub const NO_GRADE: &str = "N/A";

/// Max marks assumed when an exam carries none
pub const DEFAULT_MAX_MARKS: f64 = 100.0;

/// A graded result of the selected course, flattened for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseResult {
    pub student_name: String,
    pub exam_type: String,
    pub marks: f64,
    pub grade: String,
    pub max_marks: f64,
}

/// One row of a ranking table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// 1-based position within the exam-type group
    pub rank: usize,
    pub student_name: String,
    pub marks: f64,
    pub max_marks: f64,
    pub percentage: f64,
    pub grade: String,
}

/// Ranking table for one exam type, best marks first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamGroup {
    pub exam_type: String,
    pub entries: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseStatistics {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseAnalysis {
    pub course_id: Uuid,
    pub groups: Vec<ExamGroup>,
    pub statistics: CourseStatistics,
}

/// What the analysis view shows
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView {
    NoCourseSelected,
    Loading,
    /// Course selected, results loaded, nothing graded yet
    Empty,
    Ranked(CourseAnalysis),
}

/// Filter and project the graded results of one course, sorted by marks descending.
///
/// Ungraded results (no marks) are left out. The sort is stable, so equal
/// marks keep the store's order.
pub fn course_results(results: &[ResultWithDetails], course_id: Uuid) -> Vec<CourseResult> {
    let mut projected: Vec<CourseResult> = results
        .iter()
        .filter(|result| result.course_id() == Some(course_id))
        .filter_map(|result| {
            let marks = result.marks_obtained?;
            let exam = result.exam.as_ref();
            Some(CourseResult {
                student_name: result
                    .student
                    .as_ref()
                    .map(|student| student.full_name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                exam_type: exam
                    .and_then(|exam| exam.exam_type.clone())
                    .filter(|exam_type| !exam_type.is_empty())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                marks,
                grade: result
                    .grade
                    .map(|grade| grade.to_string())
                    .unwrap_or_else(|| NO_GRADE.to_string()),
                max_marks: exam
                    .and_then(|exam| exam.max_marks)
                    .filter(|max| *max > 0.0)
                    .unwrap_or(DEFAULT_MAX_MARKS),
            })
        })
        .collect();

    projected.sort_by(|a, b| b.marks.total_cmp(&a.marks));
    projected
}

/// Partition sorted results by exam type and rank each group.
///
/// Groups appear in the order their exam type first occurs in `sorted`.
pub fn group_by_exam_type(sorted: &[CourseResult]) -> Vec<ExamGroup> {
    let mut groups: Vec<ExamGroup> = Vec::new();

    for result in sorted {
        let index = match groups.iter().position(|group| group.exam_type == result.exam_type) {
            Some(index) => index,
            None => {
                groups.push(ExamGroup {
                    exam_type: result.exam_type.clone(),
                    entries: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[index];
        group.entries.push(RankedEntry {
            rank: group.entries.len() + 1,
            student_name: result.student_name.clone(),
            marks: result.marks,
            max_marks: result.max_marks,
            percentage: percentage(result.marks, result.max_marks),
            grade: result.grade.clone(),
        });
    }

    groups
}

/// Summary over all graded results of the course, `None` when there are none
pub fn statistics(results: &[CourseResult]) -> Option<CourseStatistics> {
    if results.is_empty() {
        return None;
    }

    let total: f64 = results.iter().map(|r| r.marks).sum();
    let max = results.iter().map(|r| r.marks).fold(f64::NEG_INFINITY, f64::max);
    let min = results.iter().map(|r| r.marks).fold(f64::INFINITY, f64::min);

    Some(CourseStatistics {
        count: results.len(),
        total,
        average: total / results.len() as f64,
        max,
        min,
    })
}

/// Full ranking for one course, `None` when the course has no graded results
pub fn rank_course_results(results: &[ResultWithDetails], course_id: Uuid) -> Option<CourseAnalysis> {
    let sorted = course_results(results, course_id);
    let statistics = statistics(&sorted)?;

    Some(CourseAnalysis {
        course_id,
        groups: group_by_exam_type(&sorted),
        statistics,
    })
}

/// Exam analysis view: result and course snapshots plus the selected course
#[derive(Debug)]
pub struct ExamAnalysisService {
    db: DatabaseService,
    scope: ViewScope,
    results: Snapshot<Vec<ResultWithDetails>>,
    courses: Snapshot<Vec<Course>>,
    selected_course: Option<Uuid>,
}

impl ExamAnalysisService {
    pub fn new(db: DatabaseService) -> Self {
        Self {
            db,
            scope: ViewScope::new(VIEW),
            results: Snapshot::new("results"),
            courses: Snapshot::new("courses"),
            selected_course: None,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    /// Fetch results and courses
    pub async fn load(&mut self) -> Result<()> {
        let (results, courses) = futures::join!(
            self.results.load(&self.scope, self.db.results.list_with_details()),
            self.courses.load(&self.scope, self.db.courses.list_ordered_by_code())
        );
        results.and(courses)
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.data()
    }

    pub fn results(&self) -> &Snapshot<Vec<ResultWithDetails>> {
        &self.results
    }

    /// Fetch errors to show as a banner
    pub fn errors(&self) -> Vec<&str> {
        [self.results.error(), self.courses.error()]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn selected_course(&self) -> Option<&Course> {
        let id = self.selected_course?;
        self.courses.data().iter().find(|course| course.id == id)
    }

    /// Select a course (or clear the selection with `None`)
    pub fn select_course(&mut self, course_id: Option<Uuid>) -> Result<()> {
        if let Some(id) = course_id {
            if !self.courses.data().iter().any(|course| course.id == id) {
                return Err(ExamResultsError::NotFound { entity: "Course", id: id.to_string() });
            }
        }
        debug!(course_id = ?course_id, "Course selected for analysis");
        self.selected_course = course_id;
        Ok(())
    }

    pub fn view(&self) -> AnalysisView {
        let Some(course_id) = self.selected_course else {
            return AnalysisView::NoCourseSelected;
        };

        if self.results.is_loading() || *self.results.state() == LoadState::Idle {
            return AnalysisView::Loading;
        }

        match rank_course_results(self.results.data(), course_id) {
            Some(analysis) => AnalysisView::Ranked(analysis),
            None => AnalysisView::Empty,
        }
    }
}
