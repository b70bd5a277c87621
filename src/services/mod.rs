//! Services module
//!
//! This module contains the domain views. Each view owns its snapshots and
//! its cancellation scope and is constructed fresh on every activation.

pub mod analysis;
pub mod dashboard;
pub mod marks;
pub mod roster;

// Re-export commonly used services
pub use analysis::{AnalysisView, CourseAnalysis, CourseStatistics, ExamAnalysisService, ExamGroup, RankedEntry};
pub use dashboard::{DashboardService, StatTile, TileValue};
pub use marks::{MarkEntryForm, MarkEntryService, ValidatedMark};
pub use roster::{NewStudentForm, RosterService};

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating views over one injected data access layer
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    database: DatabaseService,
    settings: Settings,
}

impl ServiceFactory {
    pub fn new(database: DatabaseService, settings: Settings) -> Self {
        Self { database, settings }
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.database.clone())
    }

    pub fn roster(&self) -> RosterService {
        RosterService::new(self.database.clone(), self.settings.roster.clone())
    }

    pub fn mark_entry(&self) -> MarkEntryService {
        MarkEntryService::new(self.database.clone())
    }

    pub fn exam_analysis(&self) -> ExamAnalysisService {
        ExamAnalysisService::new(self.database.clone())
    }

    /// Health check for the data store behind every view
    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }
}
