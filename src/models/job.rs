//! Job listing records.

use serde::{Deserialize, Serialize};

use crate::utils::row_id;

/// A listing decomposed from a seven-cell table row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRow {
    /// Company name with markup removed
    pub company: String,

    /// Role title
    pub role: String,

    /// Location text
    pub location: String,

    /// Salary text, often empty
    pub salary: String,

    /// Target of the apply link, empty if the cell has none
    pub apply_url: String,

    /// Relative age such as `2h` or `3d`
    pub posted: String,
}

/// A raw row identified by a hash of its content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackedRow {
    pub id: String,
    pub line: String,
}

impl TrackedRow {
    pub fn new(line: impl Into<String>) -> Self {
        let line = line.into();
        Self {
            id: row_id(&line),
            line,
        }
    }
}

/// Rows that passed the novelty filter for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewRows {
    Recent(Vec<JobRow>),
    Unseen(Vec<TrackedRow>),
}

impl NewRows {
    pub fn len(&self) -> usize {
        match self {
            NewRows::Recent(rows) => rows.len(),
            NewRows::Unseen(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
