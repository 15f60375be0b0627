//! Configuration loading.
//!
//! Configuration is resolved in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.winfreeze/config.toml`
//! 3. **CLI arguments** - Command-line flags (highest priority, applied by the binary)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::FreezeConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Path of the user config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".winfreeze").join("config.toml"))
}

/// Load defaults overlaid with the user config file.
///
/// # Errors
///
/// A missing file is not an error. Unreadable or malformed files, and
/// values that fail validation, are.
pub fn load_hierarchy() -> Result<FreezeConfig, ConfigError> {
    match user_config_path() {
        Some(path) => load_from(&path),
        None => {
            debug!(event = "core.config.home_missing");
            Ok(FreezeConfig::default())
        }
    }
}

/// Load and validate the config at `path`, falling back to defaults when the
/// file does not exist.
pub fn load_from(path: &Path) -> Result<FreezeConfig, ConfigError> {
    let config = match load_config_file(path) {
        Ok(config) => config,
        Err(ConfigError::IoError { source }) if source.kind() == ErrorKind::NotFound => {
            debug!(
                event = "core.config.file_missing",
                path = %path.display()
            );
            FreezeConfig::default()
        }
        Err(e) => return Err(e),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Load a configuration file from the given path, without validation.
pub fn load_config_file(path: &Path) -> Result<FreezeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: FreezeConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    debug!(
        event = "core.config.load_completed",
        path = %path.display()
    );
    Ok(config)
}
