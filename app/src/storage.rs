//! File-backed storage adapter.
//!
//! A mechanical stand-in for the browser's string-keyed store: each key
//! maps to one file in a data directory. Contains no decision logic.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use todos_core::environment::{Storage, StorageError};

/// Stores each key's value as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage adapter rooted at `dir`.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory this adapter writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>> {
        Box::pin(async move { tokio::fs::read_to_string(self.path_for(key)).await.ok() })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: String,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            tokio::fs::write(self.path_for(key), value)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_the_filesystem() {
        let dir = std::env::temp_dir().join("todos-storage-test");
        let storage = FileStorage::new(&dir);

        assert_eq!(storage.get("missing").await, None);

        storage.set("todos", "[]".to_string()).await.expect("write");
        assert_eq!(storage.get("todos").await, Some("[]".to_string()));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
