//! Mark entry handler

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

use crate::models::Grade;
use crate::services::MarkEntryService;
use crate::utils::errors::Result;
use crate::utils::helpers::is_affirmative;
use super::console::Console;
use super::{render_errors, render_failure, report};

pub fn grade_prompt(current: Grade) -> String {
    let choices: Vec<&str> = Grade::ALL.iter().map(Grade::as_str).collect();
    format!("Grade [{}] (default {}): ", choices.join("/"), current)
}

/// Enter marks one exam at a time; student and course carry over between entries
pub async fn enter_marks<R, W>(console: &mut Console<R, W>, view: &mut MarkEntryService) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(e) = view.load().await {
        debug!(error = %e, "Mark entry loaded with errors");
    }

    console.say("== Enter Marks ==").await?;
    if let Some(banner) = render_errors(&view.errors()) {
        console.say(&banner).await?;
    }

    loop {
        if !fill_form(console, view).await? {
            return Ok(());
        }

        report(console, view.submit().await).await?;

        let again = console.ask("Enter another result? [y/N]: ").await?;
        if !again.map(|answer| is_affirmative(&answer)).unwrap_or(false) {
            return Ok(());
        }
    }
}

/// Prompt for every field. Returns false when input ended.
///
/// A blank answer to the student or course question keeps the current selection.
async fn fill_form<R, W>(console: &mut Console<R, W>, view: &mut MarkEntryService) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let students: Vec<String> = view
        .students()
        .iter()
        .map(|student| format!("{} ({})", student.full_name, student.roll_no))
        .collect();
    if let Some(index) = console.choose("Student:", &students).await? {
        let id = view.students()[index].id;
        view.select_student(Some(id));
    }

    let courses: Vec<String> = view.courses().iter().map(|course| course.label()).collect();
    if let Some(index) = console.choose("Course:", &courses).await? {
        let id = view.courses()[index].id;
        view.select_course(Some(id));
    }

    let exams: Vec<String> = view.exams_for_course().iter().map(|exam| exam.label()).collect();
    if exams.is_empty() {
        console.say("No exams for the selected course.").await?;
    } else if let Some(index) = console.choose("Exam:", &exams).await? {
        let id = view.exams_for_course()[index].id;
        if let Err(e) = view.select_exam(Some(id)) {
            console.say(&render_failure(&e)).await?;
        }
    }

    let Some(marks) = console.ask("Marks obtained (0-100): ").await? else {
        return Ok(false);
    };
    view.set_marks(marks);

    let Some(grade) = console.ask(&grade_prompt(view.form().grade)).await? else {
        return Ok(false);
    };
    if !grade.trim().is_empty() {
        match grade.parse::<Grade>() {
            Ok(grade) => view.set_grade(grade),
            Err(message) => console.say(&format!("{}; keeping {}", message, view.form().grade)).await?,
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_prompt_lists_all_grades() {
        assert_eq!(grade_prompt(Grade::A), "Grade [A/B/C/D/F] (default A): ");
        assert!(grade_prompt(Grade::D).ends_with("(default D): "));
    }
}
