// src/pipeline/extract.rs

//! Isolates listing rows from a markdown document.
//!
//! Two strategies exist:
//! - `table_rows`: any line with enough pipe-delimited cells
//! - `marked_rows`: link-bearing rows between `<!-- TABLE_START -->` and
//!   `<!-- TABLE_END -->` comments (or named variants such as
//!   `<!-- TABLE_FAANG_START -->`)

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Policy;

use super::parse::MIN_CELLS;

static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<!--\s*TABLE(?:_[A-Z0-9_]+?)?_(START|END)\s*-->$")
        .expect("marker pattern is valid")
});

/// A region boundary comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
}

fn marker(line: &str) -> Option<Marker> {
    let caps = MARKER_PATTERN.captures(line.trim())?;
    if caps[1].eq_ignore_ascii_case("start") {
        Some(Marker::Start)
    } else {
        Some(Marker::End)
    }
}

/// Lines that contain a pipe and split into at least `MIN_CELLS` pieces.
pub fn table_rows(markdown: &str) -> Vec<&str> {
    markdown
        .lines()
        .filter(|line| line.contains('|'))
        .filter(|line| line.split('|').count() >= MIN_CELLS)
        .collect()
}

/// Pipe rows carrying an anchor tag inside marker-delimited regions.
///
/// An unmatched start marker extends the region to the end of the document;
/// an unmatched end marker is ignored.
pub fn marked_rows(markdown: &str) -> Vec<&str> {
    let mut inside = false;
    let mut rows = Vec::new();

    for line in markdown.lines() {
        match marker(line) {
            Some(Marker::Start) => inside = true,
            Some(Marker::End) => inside = false,
            None if inside && line.starts_with('|') && line.contains("<a") => rows.push(line),
            None => {}
        }
    }

    rows
}

/// Extract rows using the strategy paired with a novelty policy.
pub fn extract_rows(markdown: &str, policy: Policy) -> Vec<&str> {
    match policy {
        Policy::Recency => table_rows(markdown),
        Policy::Seen => marked_rows(markdown),
    }
}
