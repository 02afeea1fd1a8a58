// src/pipeline/parse.rs

//! Row parsing into structured or hash-identified records.

use crate::error::ParseError;
use crate::models::{JobRow, TrackedRow};
use crate::utils::{extract_href, strip_tags};

/// Pieces produced by splitting a listing row on `|`, edges included.
pub const MIN_CELLS: usize = 7;

/// Successfully parsed rows alongside the ones that were rejected.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub rows: Vec<JobRow>,
    pub errors: Vec<(String, ParseError)>,
}

/// Parse one pipe-delimited row into a listing.
///
/// Cell 0 is the text before the leading pipe, so listing fields start at 1.
pub fn parse_row(line: &str) -> Result<JobRow, ParseError> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.len() < MIN_CELLS {
        return Err(ParseError::TooFewCells {
            found: cells.len(),
            required: MIN_CELLS,
        });
    }
    if is_delimiter_row(&cells) {
        return Err(ParseError::DelimiterRow);
    }

    Ok(JobRow {
        company: strip_tags(cells[1]),
        role: cells[2].to_string(),
        location: cells[3].to_string(),
        salary: cells[4].to_string(),
        apply_url: extract_href(cells[5]).unwrap_or_default(),
        posted: cells[6].to_string(),
    })
}

/// `|---|:--:|` style header separators.
fn is_delimiter_row(cells: &[&str]) -> bool {
    let inner: Vec<&&str> = cells.iter().filter(|c| !c.is_empty()).collect();
    !inner.is_empty()
        && inner
            .iter()
            .all(|c| c.contains('-') && c.chars().all(|ch| matches!(ch, '-' | ':')))
}

/// Parse every row, keeping failures for reporting instead of aborting.
pub fn parse_rows<'a, I>(lines: I) -> ParseReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = ParseReport::default();
    for line in lines {
        match parse_row(line) {
            Ok(row) => report.rows.push(row),
            Err(error) => {
                log::debug!("Skipping row ({}): {}", error, line);
                report.errors.push((line.to_string(), error));
            }
        }
    }
    report
}

/// Identify raw rows by content hash.
pub fn track_rows<'a, I>(lines: I) -> Vec<TrackedRow>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().map(TrackedRow::new).collect()
}
