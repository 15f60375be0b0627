//! Default values used by serde `#[serde(default = "...")]` attributes.

use crate::config::types::RestoreConfig;
use crate::reposition::{DEFAULT_RETRY_INTERVAL, DEFAULT_TIMEOUT, DEFAULT_TOLERANCE};

/// Returns the default restore budget in milliseconds (10000ms).
pub fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

/// Returns the default pause between attempts in milliseconds (250ms).
pub fn default_retry_interval_ms() -> u64 {
    DEFAULT_RETRY_INTERVAL.as_millis() as u64
}

pub fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            retry_interval_ms: default_retry_interval_ms(),
            tolerance: default_tolerance(),
        }
    }
}
