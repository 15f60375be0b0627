//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [capture]
//! title_source = "window_list"
//!
//! [restore]
//! timeout_ms = 5000
//! retry_interval_ms = 100
//! tolerance = 2.0
//!
//! [storage]
//! snapshot_file = "/Users/me/.config/windows.json"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capture::{CaptureOptions, TitleSource};
use crate::reposition::RepositionOptions;
use crate::snapshot::default_snapshot_path;

/// Main configuration loaded from `~/.winfreeze/config.toml`.
///
/// Every section is optional; missing sections and keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FreezeConfig {
    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub restore: RestoreConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CaptureConfig {
    /// Where window titles come from.
    /// Options: accessibility, window_list, none.
    #[serde(default)]
    pub title_source: TitleSource,
}

impl CaptureConfig {
    pub fn to_options(&self) -> CaptureOptions {
        CaptureOptions::new(self.title_source)
    }
}

/// Repositioning loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Wall-clock budget for the whole retry loop.
    /// Default: 10000ms.
    #[serde(default = "super::defaults::default_timeout_ms")]
    pub timeout_ms: u64,

    /// Pause between attempts.
    /// Default: 250ms.
    #[serde(default = "super::defaults::default_retry_interval_ms")]
    pub retry_interval_ms: u64,

    /// Per-axis distance, in points, at which a window counts as in place.
    /// Default: 5.0.
    #[serde(default = "super::defaults::default_tolerance")]
    pub tolerance: f64,
}

impl RestoreConfig {
    pub fn to_options(&self) -> RepositionOptions {
        RepositionOptions {
            timeout: Duration::from_millis(self.timeout_ms),
            retry_interval: Duration::from_millis(self.retry_interval_ms),
            tolerance: self.tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Snapshot file used when no path is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_file: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured snapshot file, or `~/.winfreeze/windows.json`.
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_file
            .clone()
            .unwrap_or_else(default_snapshot_path)
    }
}
