// src/pipeline/filter.rs

//! Novelty filters.
//!
//! - Recency: keep listings whose Posted age is within a threshold
//! - Seen: keep rows whose identifier is missing from the persisted set

use std::collections::HashSet;

use crate::models::{JobRow, TrackedRow};
use crate::storage::SeenSet;

/// Age assigned to Posted values that cannot be read.
pub const UNKNOWN_AGE_MINUTES: u64 = 999_999;

/// Convert a relative age such as `12h`, `3d` or `45m` into minutes.
///
/// The leading unsigned integer is read and the final character picks the
/// unit. Anything else, including a signed or missing number, yields
/// `UNKNOWN_AGE_MINUTES`.
pub fn posted_to_minutes(value: &str) -> u64 {
    let value = value.trim().to_ascii_lowercase();

    let unit = match value.chars().last() {
        Some('h') => 60,
        Some('d') => 1440,
        Some('m') => 1,
        _ => return UNKNOWN_AGE_MINUTES,
    };

    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .unwrap_or(UNKNOWN_AGE_MINUTES)
}

/// Keep listings posted at most `max_age_minutes` ago.
pub fn filter_recent(rows: Vec<JobRow>, max_age_minutes: u64) -> Vec<JobRow> {
    rows.into_iter()
        .filter(|row| posted_to_minutes(&row.posted) <= max_age_minutes)
        .collect()
}

/// Keep rows whose identifier is absent from `seen`.
///
/// Repeated lines within the same document are reported once.
pub fn filter_unseen(rows: Vec<TrackedRow>, seen: &SeenSet) -> Vec<TrackedRow> {
    let mut batch = HashSet::new();
    rows.into_iter()
        .filter(|row| !seen.contains(&row.id))
        .filter(|row| batch.insert(row.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(posted: &str) -> JobRow {
        JobRow {
            company: "Acme".to_string(),
            role: "SWE".to_string(),
            location: "NYC".to_string(),
            salary: String::new(),
            apply_url: String::new(),
            posted: posted.to_string(),
        }
    }

    #[test]
    fn test_posted_to_minutes_units() {
        assert_eq!(posted_to_minutes("2h"), 120);
        assert_eq!(posted_to_minutes("3d"), 4320);
        assert_eq!(posted_to_minutes("45m"), 45);
        assert_eq!(posted_to_minutes("0d"), 0);
    }

    #[test]
    fn test_posted_to_minutes_normalizes() {
        assert_eq!(posted_to_minutes("  12H "), 720);
        assert_eq!(posted_to_minutes("1 h"), 60);
    }

    #[test]
    fn test_posted_to_minutes_unknown() {
        for value in ["", "Posted", "---", "2w", "h", "yesterday", "abc d"] {
            assert!(posted_to_minutes(value) >= UNKNOWN_AGE_MINUTES, "{value}");
        }
    }

    #[test]
    fn test_posted_to_minutes_signed_is_unknown() {
        assert_eq!(posted_to_minutes("-5h"), UNKNOWN_AGE_MINUTES);
        assert_eq!(posted_to_minutes("+5h"), UNKNOWN_AGE_MINUTES);
        assert!(filter_recent(vec![job("-5h")], 60).is_empty());
    }

    #[test]
    fn test_posted_to_minutes_overflow_is_unknown() {
        assert_eq!(posted_to_minutes("99999999999999999999d"), UNKNOWN_AGE_MINUTES);
    }

    #[test]
    fn test_filter_recent_threshold_inclusive() {
        let rows = vec![job("1h"), job("2h"), job("59m"), job("0d"), job("Posted")];
        let kept: Vec<String> = filter_recent(rows, 60)
            .into_iter()
            .map(|r| r.posted)
            .collect();
        assert_eq!(kept, vec!["1h", "59m", "0d"]);
    }

    #[test]
    fn test_filter_unseen_partitions_by_seen_set() {
        let a = TrackedRow::new("| a |");
        let b = TrackedRow::new("| b |");
        let c = TrackedRow::new("| c |");
        let seen: SeenSet = [a.id.clone(), c.id.clone()].into_iter().collect();

        let kept = filter_unseen(vec![a, b.clone(), c], &seen);
        assert_eq!(kept, vec![b]);
    }

    #[test]
    fn test_filter_unseen_dedupes_batch() {
        let rows = vec![TrackedRow::new("| a |"), TrackedRow::new("| a |")];
        assert_eq!(filter_unseen(rows, &SeenSet::default()).len(), 1);
    }
}
