//! Helper functions and utilities
//!
//! This module contains common formatting and parsing helpers used by the views.

use std::sync::OnceLock;

use regex::Regex;

/// Format a number with exactly one decimal place
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Percentage of `marks` out of `max_marks`
pub fn percentage(marks: f64, max_marks: f64) -> f64 {
    marks / max_marks * 100.0
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Trim a form field, mapping blank input to `None`
pub fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Loose email shape check, the same level of checking a browser email input does
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"))
        .is_match(email)
}

/// Parse an interactive yes/no answer, defaulting to no
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
