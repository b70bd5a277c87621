//! Dashboard service implementation

use std::fmt;

use crate::database::DatabaseService;
use crate::models::{Course, Exam, Student};
use crate::state::{CancelHandle, LoadState, Snapshot, ViewScope};
use crate::utils::errors::Result;

pub const VIEW: &str = "dashboard";

/// Value shown on a dashboard tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileValue {
    Count(usize),
    /// Collection still loading
    Pending,
    /// Fixed text with no computed value behind it
    Label(&'static str),
}

impl fmt::Display for TileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileValue::Count(count) => write!(f, "{}", count),
            TileValue::Pending => f.write_str("-"),
            TileValue::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTile {
    pub label: &'static str,
    pub value: TileValue,
}

/// Read-only counts of students, courses and exams
#[derive(Debug)]
pub struct DashboardService {
    db: DatabaseService,
    scope: ViewScope,
    students: Snapshot<Vec<Student>>,
    courses: Snapshot<Vec<Course>>,
    exams: Snapshot<Vec<Exam>>,
}

impl DashboardService {
    pub fn new(db: DatabaseService) -> Self {
        Self {
            db,
            scope: ViewScope::new(VIEW),
            students: Snapshot::new("students"),
            courses: Snapshot::new("courses"),
            exams: Snapshot::new("exams"),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    /// Fetch the three collections concurrently
    pub async fn load(&mut self) -> Result<()> {
        let (students, courses, exams) = futures::join!(
            self.students.load(&self.scope, self.db.students.list_ordered_by_name()),
            self.courses.load(&self.scope, self.db.courses.list_ordered_by_code()),
            self.exams.load(&self.scope, self.db.exams.list_ordered_by_date())
        );
        students.and(courses).and(exams)
    }

    pub fn tiles(&self) -> Vec<StatTile> {
        vec![
            StatTile {
                label: "Total Students",
                value: count(&self.students),
            },
            StatTile {
                label: "Active Courses",
                value: count(&self.courses),
            },
            StatTile {
                label: "Exams Scheduled",
                value: count(&self.exams),
            },
            StatTile {
                label: "Performance",
                value: TileValue::Label("Tracking"),
            },
        ]
    }

    /// Fetch errors to show as a banner
    pub fn errors(&self) -> Vec<&str> {
        [self.students.error(), self.courses.error(), self.exams.error()]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn count<T>(snapshot: &Snapshot<Vec<T>>) -> TileValue {
    if matches!(snapshot.state(), LoadState::Idle | LoadState::Loading) {
        TileValue::Pending
    } else {
        TileValue::Count(snapshot.data().len())
    }
}
