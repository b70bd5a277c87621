//! View handlers module
//!
//! This module contains the terminal presentation of each view:
//! pure rendering functions plus the interactive flows that drive the services.

pub mod analysis;
pub mod console;
pub mod dashboard;
pub mod marks;
pub mod students;

pub use console::{Console, StdConsole};

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{error, info};

use crate::utils::errors::{ExamResultsError, Result};

/// Main menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Dashboard,
    Students,
    EnterMarks,
    ExamAnalysis,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 5] = [
        MenuOption::Dashboard,
        MenuOption::Students,
        MenuOption::EnterMarks,
        MenuOption::ExamAnalysis,
        MenuOption::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Dashboard => "Dashboard",
            MenuOption::Students => "Students",
            MenuOption::EnterMarks => "Enter Marks",
            MenuOption::ExamAnalysis => "Exam Analysis",
            MenuOption::Quit => "Quit",
        }
    }
}

/// Banner for fetch errors, if any
pub fn render_errors(errors: &[&str]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .map(|message| format!("! {}", message))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// One-line message for a failed action
pub fn render_failure(error: &ExamResultsError) -> String {
    match error {
        ExamResultsError::Validation(message) => format!("! {}", message),
        ExamResultsError::Cancelled => "! Request cancelled".to_string(),
        other => format!("! Error: {}", other),
    }
}

/// Print the success message of an action, or its failure
pub async fn report<R, W>(console: &mut Console<R, W>, outcome: Result<String>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match outcome {
        Ok(message) => console.say(&message).await,
        Err(e) => {
            if e.is_recoverable() {
                info!(severity = %e.severity(), error = %e, "Action failed");
            } else {
                error!(severity = %e.severity(), error = %e, "Action failed");
            }
            console.say(&render_failure(&e)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_errors() {
        assert_eq!(render_errors(&[]), None);
        assert_eq!(render_errors(&["a", "b"]).as_deref(), Some("! a\n! b"));
    }

    #[test]
    fn test_render_failure() {
        let err = ExamResultsError::validation("Marks must be between 0 and 100");
        assert_eq!(render_failure(&err), "! Marks must be between 0 and 100");
        assert_eq!(render_failure(&ExamResultsError::Cancelled), "! Request cancelled");
    }

    #[test]
    fn test_menu_labels() {
        let labels: Vec<&str> = MenuOption::ALL.iter().map(|option| option.label()).collect();
        assert_eq!(labels, vec!["Dashboard", "Students", "Enter Marks", "Exam Analysis", "Quit"]);
    }
}
