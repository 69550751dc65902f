//! Catalog client: cache first, then network, then bundled snapshot.
//!
//! Every operation is request-scoped. Two concurrent fetches of the same key
//! both go to the network and the last one to finish wins the cache slot.

use crate::api::{JikanClient, ReqwestTransport};
use crate::cache::{CacheStats, CatalogCache};
use crate::error::{CatalogError, Result};
use crate::snapshot::SnapshotStore;
use shared::{CatalogPage, Category, Config, DataPaths, Entry, PageSource};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

/// Resilient catalog client with local fallback
#[derive(Debug)]
pub struct CatalogClient {
    api: JikanClient,
    snapshots: SnapshotStore,
    cache: CatalogCache,
}

impl CatalogClient {
    /// Create a client from its parts
    pub fn new(api: JikanClient, snapshots: SnapshotStore, cache: CatalogCache) -> Self {
        Self {
            api,
            snapshots,
            cache,
        }
    }

    /// Create a client talking to the real API, as configured
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = &config.catalog;
        let paths = DataPaths::from_config(config);
        let transport = ReqwestTransport::new(catalog.timeout(), &catalog.user_agent)?;
        let api = JikanClient::new(Arc::new(transport), catalog.base_url.clone(), catalog.sfw);

        info!(
            base_url = %api.base_url(),
            timeout_seconds = catalog.timeout_seconds,
            snapshot_dir = %paths.snapshots_dir().display(),
            cache_enabled = catalog.cache_enabled,
            "Catalog client initialized"
        );

        Ok(Self::new(
            api,
            SnapshotStore::new(paths.snapshots_dir()),
            CatalogCache::new(catalog.cache_enabled),
        ))
    }

    /// Fetch the list for a category
    ///
    /// Never fails: on network or decode failure the bundled snapshot is
    /// returned, and without one an empty page marked `Unavailable`.
    /// The first page obtained is served for the rest of the process.
    pub async fn fetch_top(&self, category: Category) -> CatalogPage {
        if let Some(cached) = self.cache.get_page(category).await {
            debug!(category = %category, fetched_at = %cached.fetched_at, "Serving cached page");
            return cached.value;
        }

        let page = self.load_page(category).await;
        self.store_page(&page).await;
        page
    }

    /// Like [`fetch_top`](Self::fetch_top), abandoned when `cancel` fires
    ///
    /// A cancelled fetch leaves the cache untouched.
    pub async fn fetch_top_cancellable(
        &self,
        category: Category,
        mut cancel: broadcast::Receiver<()>,
    ) -> Result<CatalogPage> {
        if let Some(cached) = self.cache.get_page(category).await {
            return Ok(cached.value);
        }

        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                info!(category = %category, "Catalog fetch cancelled");
                Err(CatalogError::Cancelled)
            }
            page = self.load_page(category) => {
                self.store_page(&page).await;
                Ok(page)
            }
        }
    }

    /// Fetch a single entry by ID
    ///
    /// Entries seen on a previously fetched page are served from the cache.
    /// Fails only with `NotFound` when the ID is absent from the cache, the
    /// network and every snapshot.
    pub async fn fetch_by_id(&self, id: u32) -> Result<Entry> {
        if id == 0 {
            return Err(CatalogError::NotFound(id));
        }

        if let Some(cached) = self.cache.get_entry(id).await {
            debug!(id = id, fetched_at = %cached.fetched_at, "Serving cached entry");
            return Ok(cached.value);
        }

        let entry = self.load_entry(id).await?;
        self.cache.set_entry(&entry).await;
        Ok(entry)
    }

    /// Like [`fetch_by_id`](Self::fetch_by_id), abandoned when `cancel` fires
    pub async fn fetch_by_id_cancellable(
        &self,
        id: u32,
        mut cancel: broadcast::Receiver<()>,
    ) -> Result<Entry> {
        if id == 0 {
            return Err(CatalogError::NotFound(id));
        }

        if let Some(cached) = self.cache.get_entry(id).await {
            return Ok(cached.value);
        }

        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                info!(id = id, "Entry fetch cancelled");
                Err(CatalogError::Cancelled)
            }
            entry = self.load_entry(id) => {
                let entry = entry?;
                self.cache.set_entry(&entry).await;
                Ok(entry)
            }
        }
    }

    /// Forget everything fetched so far
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        info!("Catalog cache cleared");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Network first, snapshot second, empty page last
    async fn load_page(&self, category: Category) -> CatalogPage {
        let cause = match self.api.get_page(category).await {
            Ok(entries) => {
                info!(category = %category, entries = entries.len(), "Fetched catalog page");
                return CatalogPage::new(category, entries, PageSource::Network);
            }
            Err(e) => e,
        };

        warn!(
            category = %category,
            error = %cause,
            "Catalog request failed, falling back to snapshot"
        );

        match self.snapshots.load(category).await {
            Ok(Some(entries)) => {
                info!(
                    category = %category,
                    entries = entries.len(),
                    "Serving bundled snapshot"
                );
                CatalogPage::new(category, entries, PageSource::Snapshot)
            }
            Ok(None) => {
                warn!(category = %category, "No snapshot bundled, returning empty page");
                CatalogPage::unavailable(category, format!("{}; no snapshot bundled", cause))
            }
            Err(e) => {
                warn!(category = %category, error = %e, "Snapshot unusable, returning empty page");
                CatalogPage::unavailable(category, format!("{}; {}", cause, e))
            }
        }
    }

    async fn store_page(&self, page: &CatalogPage) {
        // An empty stand-in must not shadow a later successful fetch
        if !page.is_unavailable() {
            self.cache.set_page(page).await;
        }
    }

    /// Network first, then every snapshot
    async fn load_entry(&self, id: u32) -> Result<Entry> {
        let cause = match self.api.get_entry(id).await {
            Ok(entry) if entry.id == id => return Ok(entry),
            Ok(entry) => CatalogError::Decode(format!(
                "requested entry {} but received {}",
                id, entry.id
            )),
            Err(e) => e,
        };

        warn!(id = id, error = %cause, "Entry request failed, searching snapshots");

        match self.snapshots.find_entry(id).await {
            Some(entry) => {
                info!(id = id, "Serving entry from bundled snapshot");
                Ok(entry)
            }
            None => {
                info!(id = id, "Entry not found");
                Err(CatalogError::NotFound(id))
            }
        }
    }
}

/// Resolve once the cancel signal fires
///
/// A dropped sender means nobody can cancel any more, so never resolve.
async fn cancelled(rx: &mut broadcast::Receiver<()>) {
    match rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}
