//! Error taxonomy for catalog requests.

use std::time::Duration;
use thiserror::Error;

/// Errors produced while fetching or decoding catalog data
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// No network, connection reset, body read failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered outside the 2xx range
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Malformed JSON or an envelope that does not match the schema
    #[error("decode error: {0}")]
    Decode(String),

    /// A bundled snapshot exists but could not be read
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// The ID is absent from the cache, the network and every snapshot
    #[error("entry {0} not found")]
    NotFound(u32),

    /// The caller abandoned the request
    #[error("request cancelled")]
    Cancelled,
}

impl CatalogError {
    /// Failures reaching the API or getting a usable status back
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CatalogError::Transport(_) | CatalogError::Timeout(_) | CatalogError::Status(_)
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, CatalogError::Decode(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
