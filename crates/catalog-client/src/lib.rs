//! Catalog client library for browsing manga metadata from MyAnimeList.
//!
//! This library fetches, decodes and caches catalog entries from the Jikan
//! API v4, falling back to bundled local snapshots when the network is
//! unavailable or a response is malformed.

pub mod api;
pub mod cache;
pub mod client;
pub mod decode;
pub mod error;
pub mod snapshot;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{HttpTransport, JikanClient, ReqwestTransport};
pub use cache::{CacheStats, CatalogCache};
pub use client::CatalogClient;
pub use error::CatalogError;
pub use snapshot::SnapshotStore;
