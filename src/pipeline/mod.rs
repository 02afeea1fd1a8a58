//! Pipeline stages for a watch run.
//!
//! - `extract`: pull candidate rows out of the markdown document
//! - `parse`: turn rows into listings or hash-identified rows
//! - `filter`: keep only rows that are new
//! - `watch`: run the stages end to end and deliver the digest

pub mod extract;
pub mod filter;
pub mod parse;
pub mod watch;

pub use extract::extract_rows;
pub use filter::{UNKNOWN_AGE_MINUTES, filter_recent, filter_unseen, posted_to_minutes};
pub use parse::{ParseReport, parse_row, parse_rows, track_rows};
pub use watch::{Delivery, Outbox, RunSummary, Scan, read_source, run_watch, scan_recent, scan_unseen};
