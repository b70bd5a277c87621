//! Student management handler

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

use crate::models::Student;
use crate::services::RosterService;
use crate::utils::errors::{ExamResultsError, Result};
use crate::utils::helpers::{is_affirmative, truncate_text};
use super::console::Console;
use super::{render_errors, render_failure, report};

pub fn render_roster(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students yet.\n".to_string();
    }

    let mut out = format!(
        "{:<4} {:<10} {:<24} {:<8} {:<4} {}\n",
        "#", "Roll No", "Name", "Dept", "Sem", "Email"
    );
    for (index, student) in students.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<10} {:<24} {:<8} {:<4} {}\n",
            index + 1,
            truncate_text(&student.roll_no, 10),
            truncate_text(&student.full_name, 24),
            truncate_text(&student.department, 8),
            student.semester,
            student.email.as_deref().unwrap_or("-"),
        ));
    }
    out
}

/// Student list with add and delete actions
pub async fn manage_students<R, W>(console: &mut Console<R, W>, view: &mut RosterService) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(e) = view.load().await {
        debug!(error = %e, "Roster loaded with errors");
    }

    loop {
        console.say("== Students ==").await?;
        if let Some(banner) = render_errors(&view.roster().error().into_iter().collect::<Vec<_>>()) {
            console.say(&banner).await?;
        }
        console.say(&render_roster(view.students())).await?;

        let Some(action) = console.ask("[a]dd, [d]elete, [b]ack: ").await? else {
            return Ok(());
        };
        match action.trim().to_lowercase().as_str() {
            "a" | "add" => add_student(console, view).await?,
            "d" | "delete" => delete_student(console, view).await?,
            "b" | "back" | "" => return Ok(()),
            other => console.say(&format!("Unknown action: {}", other)).await?,
        }
    }
}

async fn add_student<R, W>(console: &mut Console<R, W>, view: &mut RosterService) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut form = view.new_form();

    let Some(full_name) = console.ask_with_default("Full name", "").await? else { return Ok(()) };
    let Some(roll_no) = console.ask_with_default("Roll number", "").await? else { return Ok(()) };
    let Some(department) = console.ask_with_default("Department", &form.department).await? else { return Ok(()) };
    let Some(semester) = console.ask_with_default("Semester (1-8)", &form.semester.to_string()).await? else { return Ok(()) };
    let Some(email) = console.ask_with_default("Email (optional)", "").await? else { return Ok(()) };

    form.full_name = full_name;
    form.roll_no = roll_no;
    form.department = department;
    form.email = email;
    form.semester = match semester.trim().parse() {
        Ok(semester) => semester,
        Err(_) => {
            let err = ExamResultsError::validation("Semester must be between 1 and 8");
            return console.say(&render_failure(&err)).await;
        }
    };

    report(console, view.add_student(&form).await).await
}

async fn delete_student<R, W>(console: &mut Console<R, W>, view: &mut RosterService) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let options: Vec<String> = view
        .students()
        .iter()
        .map(|student| format!("{} ({})", student.full_name, student.roll_no))
        .collect();
    if options.is_empty() {
        return console.say("No students to delete.").await;
    }

    let Some(index) = console.choose("Delete which student?", &options).await? else {
        return Ok(());
    };
    let student = &view.students()[index];
    let (id, name) = (student.id, student.full_name.clone());

    let prompt = format!("Are you sure you want to delete {}? [y/N]: ", name);
    let confirmed = console.ask(&prompt).await?.map(|answer| is_affirmative(&answer)).unwrap_or(false);
    if !confirmed {
        return console.say("Delete cancelled.").await;
    }

    report(console, view.delete_student(id).await).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_render_empty_roster() {
        assert_eq!(render_roster(&[]), "No students yet.\n");
    }

    #[test]
    fn test_render_roster_rows() {
        let students = vec![Student {
            id: Uuid::from_u128(1),
            stud_id: 1,
            roll_no: "R1".to_string(),
            full_name: "Ann Lee".to_string(),
            department: "CSE".to_string(),
            semester: 3,
            email: None,
        }];
        let rendered = render_roster(&students);
        let row = rendered.lines().nth(1).unwrap();
        assert!(row.starts_with("1    R1"));
        assert!(row.contains("Ann Lee"));
        assert!(row.ends_with('-'));
    }
}
