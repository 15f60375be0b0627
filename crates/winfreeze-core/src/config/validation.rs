use crate::config::types::FreezeConfig;
use crate::errors::ConfigError;

/// Validate the configuration.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidConfiguration`] for a zero timeout or retry
/// interval, a negative or non-finite tolerance, or an empty snapshot path.
pub fn validate_config(config: &FreezeConfig) -> Result<(), ConfigError> {
    if config.restore.timeout_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "restore.timeout_ms must be greater than 0".to_string(),
        });
    }

    if config.restore.retry_interval_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "restore.retry_interval_ms must be greater than 0".to_string(),
        });
    }

    let tolerance = config.restore.tolerance;
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "restore.tolerance must be a finite number >= 0, got {}",
                tolerance
            ),
        });
    }

    if let Some(path) = &config.storage.snapshot_file
        && path.as_os_str().is_empty()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "storage.snapshot_file must not be empty".to_string(),
        });
    }

    Ok(())
}
