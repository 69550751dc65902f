//! Scripted HTTP transport for tests.
//!
//! Responses are registered per URL; anything unregistered fails like an
//! unreachable network. Every request is recorded for assertions.
//!
//! ```rust,ignore
//! let transport = Arc::new(MockTransport::new());
//! transport.respond(url, 200, r#"{"data":[]}"#).await;
//! let client = CatalogClient::new(JikanClient::new(transport.clone(), base, true), snapshots, cache);
//! assert_eq!(transport.request_count().await, 0);
//! ```

use crate::api::{HttpResponse, HttpTransport};
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Mock implementation of the HttpTransport trait
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Scripted outcomes by URL
    routes: Arc<RwLock<HashMap<String, Result<HttpResponse>>>>,
    /// URLs requested, in order
    requests: Arc<RwLock<Vec<String>>>,
    /// Artificial latency applied to every request
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a status and body
    pub async fn respond(&self, url: &str, status: u16, body: &str) {
        self.routes.write().await.insert(
            url.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    /// Fail `url` with the given error
    pub async fn fail(&self, url: &str, error: CatalogError) {
        self.routes
            .write()
            .await
            .insert(url.to_string(), Err(error));
    }

    /// Delay every response
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.write().await.push(url.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.routes
            .read()
            .await
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(CatalogError::Transport(format!("no route to {}", url))))
    }
}
