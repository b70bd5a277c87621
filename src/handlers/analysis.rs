//! Exam analysis handler

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

use crate::models::Course;
use crate::services::{AnalysisView, CourseAnalysis, CourseStatistics, ExamAnalysisService, ExamGroup};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_one_decimal, truncate_text};
use super::console::Console;
use super::{render_errors, render_failure};

pub const EMPTY_STATE: &str = "No results recorded for this course yet";

pub fn render_statistics(statistics: &CourseStatistics) -> String {
    format!(
        "Average: {}   Highest: {}   Lowest: {}   Results: {}\n",
        format_one_decimal(statistics.average),
        format_one_decimal(statistics.max),
        format_one_decimal(statistics.min),
        statistics.count
    )
}

pub fn render_group(group: &ExamGroup) -> String {
    let mut out = format!("-- {} --\n", group.exam_type);
    out.push_str(&format!(
        "{:<5} {:<24} {:>8} {:>11} {}\n",
        "Rank", "Student", "Marks", "Percentage", "Grade"
    ));
    for entry in &group.entries {
        out.push_str(&format!(
            "{:<5} {:<24} {:>8} {:>10}% {}\n",
            entry.rank,
            truncate_text(&entry.student_name, 24),
            format_one_decimal(entry.marks),
            format_one_decimal(entry.percentage),
            entry.grade
        ));
    }
    out
}

fn render_ranked(analysis: &CourseAnalysis) -> String {
    let mut out = render_statistics(&analysis.statistics);
    for group in &analysis.groups {
        out.push('\n');
        out.push_str(&render_group(group));
    }
    out
}

/// Render the analysis panel. Nothing is shown until a course is chosen.
pub fn render_analysis(view: &AnalysisView, course: Option<&Course>) -> String {
    let heading = course
        .map(|course| format!("== {} ==\n", course.label()))
        .unwrap_or_default();

    match view {
        AnalysisView::NoCourseSelected => String::new(),
        AnalysisView::Loading => format!("{}Loading results...\n", heading),
        AnalysisView::Empty => format!("{}{}\n", heading, EMPTY_STATE),
        AnalysisView::Ranked(analysis) => format!("{}{}", heading, render_ranked(analysis)),
    }
}

/// Pick courses one after another until a blank answer
pub async fn explore_results<R, W>(console: &mut Console<R, W>, view: &mut ExamAnalysisService) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(e) = view.load().await {
        debug!(error = %e, "Exam analysis loaded with errors");
    }

    console.say("== Exam Analysis ==").await?;
    if let Some(banner) = render_errors(&view.errors()) {
        console.say(&banner).await?;
    }

    loop {
        let courses: Vec<String> = view.courses().iter().map(|course| course.label()).collect();
        if courses.is_empty() {
            return console.say("No courses available.").await;
        }

        let Some(index) = console.choose("Course (blank to go back):", &courses).await? else {
            return Ok(());
        };
        let id = view.courses()[index].id;
        if let Err(e) = view.select_course(Some(id)) {
            console.say(&render_failure(&e)).await?;
            continue;
        }

        console.say(&render_analysis(&view.view(), view.selected_course())).await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RankedEntry;
    use uuid::Uuid;

    fn course() -> Course {
        Course {
            id: Uuid::from_u128(7),
            course_id: 1,
            course_code: "CS201".to_string(),
            course_name: "Data Structures".to_string(),
            credits: 4,
            department: "CSE".to_string(),
        }
    }

    fn entry(rank: usize, name: &str, marks: f64) -> RankedEntry {
        RankedEntry {
            rank,
            student_name: name.to_string(),
            marks,
            max_marks: 100.0,
            percentage: marks,
            grade: "A".to_string(),
        }
    }

    #[test]
    fn test_nothing_rendered_without_course() {
        assert_eq!(render_analysis(&AnalysisView::NoCourseSelected, None), "");
    }

    #[test]
    fn test_empty_state() {
        let rendered = render_analysis(&AnalysisView::Empty, Some(&course()));
        assert!(rendered.starts_with("== Data Structures (CS201) =="));
        assert!(rendered.contains(EMPTY_STATE));
    }

    #[test]
    fn test_ranked_tables() {
        let analysis = CourseAnalysis {
            course_id: course().id,
            groups: vec![ExamGroup {
                exam_type: "Midterm".to_string(),
                entries: vec![entry(1, "Ann", 90.0), entry(2, "Bob", 70.0)],
            }],
            statistics: CourseStatistics {
                count: 2,
                total: 160.0,
                average: 80.0,
                max: 90.0,
                min: 70.0,
            },
        };

        let rendered = render_analysis(&AnalysisView::Ranked(analysis), Some(&course()));
        assert!(rendered.contains("Average: 80.0   Highest: 90.0   Lowest: 70.0   Results: 2"));
        assert!(rendered.contains("-- Midterm --"));

        let rows: Vec<&str> = rendered.lines().filter(|line| line.starts_with(['1', '2'])).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Ann") && rows[0].contains("90.0%"));
        assert!(rows[1].contains("Bob") && rows[1].contains("70.0%"));
    }
}
