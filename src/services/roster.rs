//! Roster service implementation
//!
//! This service lists, adds and deletes students. Every mutation is followed
//! by a full re-fetch of the roster; nothing is updated optimistically.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RosterDefaults;
use crate::database::DatabaseService;
use crate::models::{CreateStudentRequest, Student};
use crate::state::{CancelHandle, Snapshot, ViewScope};
use crate::utils::errors::{ExamResultsError, Result};
use crate::utils::helpers::{is_valid_email, non_blank};
use crate::utils::logging::{log_mutation, log_validation_failure};

pub const VIEW: &str = "students";

/// Raw add-student form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudentForm {
    pub full_name: String,
    pub roll_no: String,
    pub department: String,
    pub semester: u8,
    pub email: String,
}

impl NewStudentForm {
    /// Empty form pre-filled with the configured department and semester
    pub fn with_defaults(defaults: &RosterDefaults) -> Self {
        Self {
            full_name: String::new(),
            roll_no: String::new(),
            department: defaults.department.clone(),
            semester: defaults.semester,
            email: String::new(),
        }
    }

    /// Check the form and turn it into an insert payload
    pub fn validate(&self, defaults: &RosterDefaults) -> Result<CreateStudentRequest> {
        let (Some(full_name), Some(roll_no)) = (non_blank(&self.full_name), non_blank(&self.roll_no)) else {
            return Err(ExamResultsError::validation("Name and Roll Number are required"));
        };

        if !(1..=8).contains(&self.semester) {
            return Err(ExamResultsError::validation("Semester must be between 1 and 8"));
        }

        let email = non_blank(&self.email);
        if let Some(email) = &email {
            if !is_valid_email(email) {
                return Err(ExamResultsError::validation(format!("Invalid email address: {}", email)));
            }
        }

        Ok(CreateStudentRequest {
            roll_no,
            full_name,
            department: non_blank(&self.department).unwrap_or_else(|| defaults.department.clone()),
            semester: self.semester,
            email,
        })
    }
}

/// Student management view
#[derive(Debug)]
pub struct RosterService {
    db: DatabaseService,
    defaults: RosterDefaults,
    scope: ViewScope,
    roster: Snapshot<Vec<Student>>,
}

impl RosterService {
    pub fn new(db: DatabaseService, defaults: RosterDefaults) -> Self {
        Self {
            db,
            defaults,
            scope: ViewScope::new(VIEW),
            roster: Snapshot::new("roster"),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    /// Fetch the roster ordered by name
    pub async fn load(&mut self) -> Result<()> {
        debug!("Loading roster");
        self.roster.load(&self.scope, self.db.students.list_ordered_by_name()).await
    }

    pub fn roster(&self) -> &Snapshot<Vec<Student>> {
        &self.roster
    }

    pub fn students(&self) -> &[Student] {
        self.roster.data()
    }

    pub fn new_form(&self) -> NewStudentForm {
        NewStudentForm::with_defaults(&self.defaults)
    }

    /// Resolve a student in the current roster, e.g. before asking for confirmation
    pub fn find(&self, id: Uuid) -> Result<&Student> {
        self.students()
            .iter()
            .find(|student| student.id == id)
            .ok_or_else(|| ExamResultsError::NotFound { entity: "Student", id: id.to_string() })
    }

    /// Add a student, then re-fetch the roster. Returns the success message.
    pub async fn add_student(&mut self, form: &NewStudentForm) -> Result<String> {
        let request = form.validate(&self.defaults).inspect_err(|e| {
            log_validation_failure(VIEW, &e.to_string());
        })?;

        let student = self.scope.run(self.db.students.create(request)).await?;
        log_mutation("student", "insert", Some(&student.id.to_string()));
        info!(student_id = %student.id, roll_no = %student.roll_no, "Student added");

        self.refresh().await;
        Ok(format!("Student {} added successfully!", student.full_name))
    }

    /// Delete a student (the caller has already confirmed), then re-fetch the roster
    pub async fn delete_student(&mut self, id: Uuid) -> Result<String> {
        let name = self.find(id)?.full_name.clone();

        self.scope.run(self.db.students.delete(id)).await?;
        log_mutation("student", "delete", Some(&id.to_string()));
        info!(student_id = %id, "Student deleted");

        self.refresh().await;
        Ok(format!("Student {} deleted successfully", name))
    }

    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "Roster refresh after mutation failed");
        }
    }
}
