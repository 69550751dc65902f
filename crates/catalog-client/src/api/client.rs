//! Jikan API endpoints for the catalog.

use super::transport::HttpTransport;
use super::types::JikanError;
use crate::decode;
use crate::error::{CatalogError, Result};
use shared::{Category, Entry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Jikan API v4 client
///
/// Issues exactly one GET per call: no retries, no pagination.
#[derive(Clone)]
pub struct JikanClient {
    /// HTTP transport
    transport: Arc<dyn HttpTransport>,
    /// Base URL for Jikan API, without trailing slash
    base_url: String,
    /// Append `sfw=true` to list endpoints
    sfw: bool,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>, sfw: bool) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            sfw,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a category's list endpoint
    pub fn list_url(&self, category: Category) -> String {
        let path = match category {
            Category::Manga => "/top/manga",
            Category::Recommendations => "/recommendations/manga",
        };

        if self.sfw {
            format!("{}{}?sfw=true", self.base_url, path)
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// URL of the detail endpoint for an ID
    pub fn detail_url(&self, id: u32) -> String {
        format!("{}/manga/{}", self.base_url, id)
    }

    /// Make a GET request and return the body of a 2xx response
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            let message = serde_json::from_str::<JikanError>(&response.body)
                .map(|e| e.message)
                .unwrap_or_else(|_| "Unknown error".to_string());

            warn!(
                url = %url,
                status = response.status,
                error = %message,
                "Request failed"
            );
            return Err(CatalogError::Status(response.status));
        }

        debug!(url = %url, "Request successful");
        Ok(response.body)
    }

    /// Fetch the entries of a category's list endpoint
    pub async fn get_page(&self, category: Category) -> Result<Vec<Entry>> {
        info!(category = %category, "Fetching catalog list");
        let body = self.get(&self.list_url(category)).await?;

        decode::decode_page(category, &body).map_err(|e| {
            warn!(category = %category, error = %e, "Failed to parse response");
            e
        })
    }

    /// Fetch a single entry by MAL ID
    pub async fn get_entry(&self, id: u32) -> Result<Entry> {
        debug!(id = id, "Fetching entry details");
        let body = self.get(&self.detail_url(id)).await?;

        decode::decode_item(&body).map_err(|e| {
            warn!(id = id, error = %e, "Failed to parse response");
            e
        })
    }
}

impl std::fmt::Debug for JikanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JikanClient")
            .field("base_url", &self.base_url)
            .field("sfw", &self.sfw)
            .finish()
    }
}
