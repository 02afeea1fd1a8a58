//! Storage abstractions for seen-row persistence.
//!
//! The state file is a flat JSON array of row identifiers:
//!
//! ```text
//! .state/
//! └── seen.json     # ["0a1b2c3d4e5f6a7b", "..."]
//! ```

pub mod local;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::TrackedRow;

// Re-export for convenience
pub use local::LocalSeenStore;

/// Identifiers of rows that have already been announced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet(HashSet<String>);

impl SeenSet {
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Returns `true` if the identifier was not present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    /// Record every row as announced.
    pub fn mark(&mut self, rows: &[TrackedRow]) {
        self.0.extend(rows.iter().map(|row| row.id.clone()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifiers in lexical order, for stable output.
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.0.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<String> for SeenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Trait for seen-set storage backends.
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Load the seen set. Missing or unreadable state yields an empty set.
    async fn load(&self) -> SeenSet;

    /// Persist the seen set, replacing the previous contents.
    async fn save(&self, seen: &SeenSet) -> Result<()>;
}
