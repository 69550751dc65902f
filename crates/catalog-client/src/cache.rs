//! In-memory cache for catalog data.
//!
//! Pages are cached per category and entries per ID. Nothing is ever
//! evicted; a later store of the same key overwrites the earlier one.
//! The lock is only held for the map operation itself.

use chrono::{DateTime, Utc};
use shared::{CatalogPage, Category, Entry};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A cached value and when it was fetched
#[derive(Debug, Clone)]
pub struct Cached<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Cached<T> {
    fn now(value: T) -> Self {
        Self {
            value,
            fetched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct Slots {
    pages: HashMap<Category, Cached<CatalogPage>>,
    entries: HashMap<u32, Cached<Entry>>,
}

/// Cache manager for fetched pages and entries
#[derive(Debug)]
pub struct CatalogCache {
    slots: RwLock<Slots>,
    /// Whether caching is enabled
    enabled: bool,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CatalogCache {
    /// Create a new cache
    pub fn new(enabled: bool) -> Self {
        Self {
            slots: RwLock::new(Slots::default()),
            enabled,
        }
    }

    /// Get the cached page for a category
    pub async fn get_page(&self, category: Category) -> Option<Cached<CatalogPage>> {
        if !self.enabled {
            return None;
        }

        let hit = self.slots.read().await.pages.get(&category).cloned();
        debug!(category = %category, hit = hit.is_some(), "Page cache lookup");
        hit
    }

    /// Store a page and index each of its entries by ID
    ///
    /// Entries already cached are kept: list rows (recommendations in
    /// particular) carry fewer fields than a detail fetch.
    pub async fn set_page(&self, page: &CatalogPage) {
        if !self.enabled {
            return;
        }

        let mut slots = self.slots.write().await;
        let cached = Cached::now(page.clone());
        for entry in &page.entries {
            slots.entries.entry(entry.id).or_insert_with(|| Cached {
                value: entry.clone(),
                fetched_at: cached.fetched_at,
            });
        }
        slots.pages.insert(page.category, cached);

        debug!(
            category = %page.category,
            entries = page.entries.len(),
            "Page cached"
        );
    }

    /// Get a cached entry by ID
    pub async fn get_entry(&self, id: u32) -> Option<Cached<Entry>> {
        if !self.enabled {
            return None;
        }

        let hit = self.slots.read().await.entries.get(&id).cloned();
        debug!(id = id, hit = hit.is_some(), "Entry cache lookup");
        hit
    }

    /// Store a single entry
    pub async fn set_entry(&self, entry: &Entry) {
        if !self.enabled {
            return;
        }

        self.slots
            .write()
            .await
            .entries
            .insert(entry.id, Cached::now(entry.clone()));
        debug!(id = entry.id, "Entry cached");
    }

    /// Drop everything
    pub async fn clear(&self) {
        let mut slots = self.slots.write().await;
        slots.pages.clear();
        slots.entries.clear();
        debug!("Cache cleared");
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let slots = self.slots.read().await;
        CacheStats {
            pages: slots.pages.len(),
            entries: slots.entries.len(),
            enabled: self.enabled,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub pages: usize,
    pub entries: usize,
    pub enabled: bool,
}
