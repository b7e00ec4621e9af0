//! Text rendering of courses and terminal styling.

use owo_colors::{colors::css, OwoColorize};
use planner::Course;

/// `CSCI300, Introduction to Algorithms`
#[must_use]
pub fn course_line(course: &Course) -> String {
    format!("{}, {}", course.identifier(), course.name())
}

/// Prerequisites in stored order, or `None`.
#[must_use]
pub fn prerequisites_line(course: &Course) -> String {
    if course.prerequisites().is_empty() {
        "Prerequisites: None".to_string()
    } else {
        format!("Prerequisites: {}", course.prerequisites().join(", "))
    }
}

/// The two-line detail view of a single course.
#[must_use]
pub fn course_detail(course: &Course) -> String {
    format!("{}\n{}", course_line(course), prerequisites_line(course))
}

/// Whether the terminal is too narrow for the table layout (< 60 columns).
#[must_use]
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < 60)
}

#[derive(Debug, Clone, Copy)]
pub enum Tone {
    Success,
    Warning,
    Dim,
}

/// Colors `text` when stdout supports it.
#[must_use]
pub fn paint(text: &str, tone: Tone) -> String {
    if supports_color::on(supports_color::Stream::Stdout).is_none() {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.fg::<css::Green>().to_string(),
        Tone::Warning => text.fg::<css::Orange>().to_string(),
        Tone::Dim => text.dimmed().to_string(),
    }
}
