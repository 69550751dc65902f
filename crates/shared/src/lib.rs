//! Shared library for the webhon catalog.
//!
//! This crate provides common functionality used by the catalog client and
//! its command-line front end:
//! - Configuration management
//! - Catalog data models
//! - File path utilities
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::{CatalogConfig, Config};
pub use logging::LogConfig;
pub use models::*;
pub use paths::DataPaths;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
