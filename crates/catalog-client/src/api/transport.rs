//! HTTP transport used by the catalog client.
//!
//! The client only ever issues plain GET requests and needs the status code
//! and the body text back, so the seam is kept that small.

use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform a single GET request
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one GET request, with no retries
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with a per-request timeout
    pub fn new(timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> CatalogError {
        if e.is_timeout() {
            CatalogError::Timeout(self.timeout)
        } else {
            CatalogError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!(url = %url, "Making API request");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request error");
            self.map_error(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!(url = %url, status = status, error = %e, "Failed to read response body");
            self.map_error(e)
        })?;

        debug!(url = %url, status = status, bytes = body.len(), "Response received");
        Ok(HttpResponse { status, body })
    }
}
