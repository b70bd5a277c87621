//! Database service layer
//!
//! This module bundles the collection repositories over one shared client

use crate::database::{CourseRepository, ExamRepository, ResultRepository, StoreClient, StudentRepository};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub students: StudentRepository,
    pub courses: CourseRepository,
    pub exams: ExamRepository,
    pub results: ResultRepository,
    client: StoreClient,
}

impl DatabaseService {
    pub fn new(client: StoreClient) -> Self {
        Self {
            students: StudentRepository::new(client.clone()),
            courses: CourseRepository::new(client.clone()),
            exams: ExamRepository::new(client.clone()),
            results: ResultRepository::new(client.clone()),
            client,
        }
    }

    /// Check that the store is reachable with the configured credentials
    pub async fn health_check(&self) -> Result<()> {
        self.client.health_check().await
    }
}
