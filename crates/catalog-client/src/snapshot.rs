//! Bundled local snapshots used as an offline fallback.
//!
//! Snapshots share the network envelopes and are decoded by the same lenient
//! decoder. They are read-only: nothing in this crate ever writes them.

use crate::decode;
use crate::error::{CatalogError, Result};
use shared::{Category, Entry};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read-only store of bundled snapshot files
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Directory containing one JSON file per category
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory doesn't have to exist; every lookup then misses.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Get the snapshot file path for a category
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.dir.join(category.snapshot_file_name())
    }

    /// Load the snapshot for a category
    ///
    /// Returns `Ok(None)` if no snapshot is bundled for it.
    pub async fn load(&self, category: Category) -> Result<Option<Vec<Entry>>> {
        let path = self.path_for(category);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot bundled");
                return Ok(None);
            }
            Err(e) => {
                return Err(CatalogError::Snapshot(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let entries = decode::decode_page(category, &content).map_err(|e| {
            CatalogError::Snapshot(format!("failed to parse {}: {}", path.display(), e))
        })?;

        debug!(
            category = %category,
            path = %path.display(),
            entries = entries.len(),
            "Snapshot loaded"
        );
        Ok(Some(entries))
    }

    /// Search every category snapshot for an entry
    ///
    /// Unreadable snapshots are skipped.
    pub async fn find_entry(&self, id: u32) -> Option<Entry> {
        for category in Category::ALL {
            match self.load(category).await {
                Ok(Some(entries)) => {
                    if let Some(entry) = entries.into_iter().find(|e| e.id == id) {
                        return Some(entry);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(category = %category, error = %e, "Skipping unreadable snapshot");
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOP: &str = r#"{"data":[{"mal_id":2,"title":"Berserk"},{"mal_id":13,"title":"One Piece"}]}"#;
    const RECS: &str = r#"{"data":[{"mal_id":"2-656","entry":[{"mal_id":2,"title":"Berserk"},{"mal_id":656,"title":"Vagabond"}]}]}"#;

    #[tokio::test]
    async fn test_load_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("top_manga.json"), TOP).unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let entries = store.load(Category::Manga).await.unwrap().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].title, "One Piece");
    }

    #[tokio::test]
    async fn test_missing_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("does-not-exist"));

        assert!(store.load(Category::Manga).await.unwrap().is_none());
        assert!(store.find_entry(2).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("top_manga.json"), "{not json").unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let err = store.load(Category::Manga).await.unwrap_err();
        assert!(matches!(err, CatalogError::Snapshot(_)));
    }

    #[tokio::test]
    async fn test_bundled_snapshots_decode() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/snapshots");
        let store = SnapshotStore::new(dir);

        let top = store.load(Category::Manga).await.unwrap().unwrap();
        assert_eq!(top.len(), 5);
        assert!(top.iter().all(|e| !e.title.is_empty() && e.score.is_some()));

        let recs = store.load(Category::Recommendations).await.unwrap().unwrap();
        assert_eq!(recs.len(), 4);
    }

    #[tokio::test]
    async fn test_find_entry_searches_all_categories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("top_manga.json"), "{not json").unwrap();
        std::fs::write(temp_dir.path().join("recommendations_manga.json"), RECS).unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let entry = store.find_entry(656).await.unwrap();
        assert_eq!(entry.title, "Vagabond");
        assert!(store.find_entry(999).await.is_none());
    }
}
