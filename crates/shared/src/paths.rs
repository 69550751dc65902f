//! File path utilities for organizing data files.
//!
//! Paths come from the resolved configuration, so the directories created at
//! startup are the ones the client actually reads and writes.

use crate::config::Config;
use std::path::{Path, PathBuf};

/// File path manager for data files
#[derive(Debug, Clone)]
pub struct DataPaths {
    snapshots_dir: PathBuf,
    logs_dir: PathBuf,
}

impl DataPaths {
    /// Resolve every directory against the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self {
            snapshots_dir: config.snapshot_dir(),
            logs_dir: config.log_dir(),
        }
    }

    // ========== Snapshots (READ-ONLY) ==========

    /// Get the bundled snapshot directory
    pub fn snapshots_dir(&self) -> &Path {
        &self.snapshots_dir
    }

    // ========== Logs ==========

    /// Get logs directory
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    // ========== Utility Methods ==========

    /// Create the directories the process writes to
    ///
    /// Snapshots are bundled data and are never created here.
    pub fn create_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.logs_dir)
    }
}
