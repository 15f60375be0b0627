//! # Configuration System
//!
//! TOML configuration for winfreeze, read from `~/.winfreeze/config.toml`.
//! A missing file means defaults; command-line flags override file values.
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use winfreeze_core::config::FreezeConfig;
//!
//! fn example() -> Result<(), winfreeze_core::errors::ConfigError> {
//!     let config = FreezeConfig::load_hierarchy()?;
//!     let options = config.restore.to_options();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use loading::{load_config_file, load_from, user_config_path};
pub use types::{CaptureConfig, FreezeConfig, RestoreConfig, StorageConfig};
pub use validation::validate_config;

impl FreezeConfig {
    /// See [`loading::load_hierarchy`].
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
