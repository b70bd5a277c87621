//! Course repository implementation (read-only)

use crate::database::connection::{StoreClient, StoreQuery};
use crate::models::course::Course;
use crate::utils::errors::Result;

pub const COLLECTION: &str = "course";

#[derive(Clone)]
#[derive(Debug)]
pub struct CourseRepository {
    client: StoreClient,
}

impl CourseRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// List all courses ordered by course code
    pub async fn list_ordered_by_code(&self) -> Result<Vec<Course>> {
        let query = StoreQuery::new().select("*").order("course_code");
        self.client.select(COLLECTION, &query).await
    }
}
