//! Local filesystem storage for the seen set.
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the
//! target, so a crashed run never leaves a half-written state file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{SeenSet, SeenStore};

/// JSON-array state file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSeenStore {
    path: PathBuf,
}

impl LocalSeenStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read and decode the identifier array.
    async fn read_ids(&self) -> Result<Option<Vec<String>>> {
        match self.read_bytes().await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SeenStore for LocalSeenStore {
    async fn load(&self) -> SeenSet {
        match self.read_ids().await {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => {
                log::info!("No state file at {}; starting fresh", self.path.display());
                SeenSet::default()
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable state file {}: {}",
                    self.path.display(),
                    e
                );
                SeenSet::default()
            }
        }
    }

    async fn save(&self, seen: &SeenSet) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&seen.sorted())?;
        self.write_bytes(&bytes).await?;
        log::info!(
            "Saved {} seen identifiers to {}",
            seen.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSeenStore::new(tmp.path().join("seen.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = LocalSeenStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen.json");
        std::fs::write(&path, br#"{"ids": ["a"]}"#).unwrap();

        assert!(LocalSeenStore::new(&path).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_roundtrips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/state/seen.json");
        let store = LocalSeenStore::new(&path);

        let seen: SeenSet = ["b2".to_string(), "a1".to_string()].into_iter().collect();
        store.save(&seen).await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let raw: Vec<String> = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw, vec!["a1", "b2"]);

        assert_eq!(store.load().await, seen);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSeenStore::new(tmp.path().join("seen.json"));

        let first: SeenSet = ["a".to_string()].into_iter().collect();
        let second: SeenSet = ["b".to_string(), "c".to_string()].into_iter().collect();
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        assert_eq!(store.load().await, second);
    }
}
