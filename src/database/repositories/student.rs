//! Student repository implementation

use tracing::warn;
use uuid::Uuid;

use crate::database::connection::{StoreClient, StoreQuery};
use crate::models::student::{CreateStudentRequest, Student};
use crate::utils::errors::{ExamResultsError, Result, StoreError};

pub const COLLECTION: &str = "student";

#[derive(Clone)]
#[derive(Debug)]
pub struct StudentRepository {
    client: StoreClient,
}

impl StudentRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// List the roster ordered by full name
    pub async fn list_ordered_by_name(&self) -> Result<Vec<Student>> {
        let query = StoreQuery::new().select("*").order("full_name");
        self.client.select(COLLECTION, &query).await
    }

    /// Insert one student and return it with its generated identity
    pub async fn create(&self, request: CreateStudentRequest) -> Result<Student> {
        let mut rows: Vec<Student> = self.client.insert(COLLECTION, &[request]).await?;
        rows.pop().ok_or_else(|| {
            ExamResultsError::Store(StoreError::InvalidResponse(
                "insert returned no student row".to_string(),
            ))
        })
    }

    /// Delete a student by identity
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let query = StoreQuery::new().eq("id", id);
        let removed = self.client.delete(COLLECTION, &query).await.map_err(|e| match e {
            ExamResultsError::Store(StoreError::ForeignKeyViolation(_)) => {
                ExamResultsError::Store(StoreError::ForeignKeyViolation(
                    "Student still has recorded results".to_string(),
                ))
            }
            other => other,
        })?;

        if removed == 0 {
            warn!(student_id = %id, "Delete matched no student");
            return Err(ExamResultsError::NotFound { entity: "Student", id: id.to_string() });
        }

        Ok(())
    }
}
