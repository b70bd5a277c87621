//! Result repository implementation

use crate::database::connection::{StoreClient, StoreQuery};
use crate::models::result::{ExamResult, ResultWithDetails, UpsertResultRequest};
use crate::utils::errors::{ExamResultsError, Result, StoreError};

pub const COLLECTION: &str = "result";

/// Unique constraint results are upserted on
pub const CONFLICT_COLUMNS: &str = "student_id,exam_id";

/// Embedded join: the student, and the exam with its course
pub const DETAILS_SELECT: &str = r#"
    *,
    student: student_id (id, full_name, roll_no, stud_id),
    exam: exam_id (id, exam_type, exam_date, max_marks, course_id,
        course: course_id (id, course_code, course_name)
    )
"#;

#[derive(Clone)]
#[derive(Debug)]
pub struct ResultRepository {
    client: StoreClient,
}

impl ResultRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// List all results joined with student and exam→course, ordered by exam id
    pub async fn list_with_details(&self) -> Result<Vec<ResultWithDetails>> {
        let query = StoreQuery::new().select(DETAILS_SELECT).order("exam_id");
        self.client.select(COLLECTION, &query).await
    }

    /// Insert or update the result for a (student, exam) pair
    pub async fn upsert(&self, request: UpsertResultRequest) -> Result<ExamResult> {
        let mut rows: Vec<ExamResult> = self
            .client
            .upsert(COLLECTION, &[request], CONFLICT_COLUMNS)
            .await?;
        rows.pop().ok_or_else(|| {
            ExamResultsError::Store(StoreError::InvalidResponse(
                "upsert returned no result row".to_string(),
            ))
        })
    }
}
