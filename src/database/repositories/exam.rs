//! Exam repository implementation (read-only)

use crate::database::connection::{StoreClient, StoreQuery};
use crate::models::exam::Exam;
use crate::utils::errors::Result;

pub const COLLECTION: &str = "exam";

#[derive(Clone)]
#[derive(Debug)]
pub struct ExamRepository {
    client: StoreClient,
}

impl ExamRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// List all exams ordered by exam date
    pub async fn list_ordered_by_date(&self) -> Result<Vec<Exam>> {
        let query = StoreQuery::new().select("*").order("exam_date");
        self.client.select(COLLECTION, &query).await
    }
}
