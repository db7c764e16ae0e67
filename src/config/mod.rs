//! Application configuration.
//!
//! Loaded from `~/.config/geomarker/config.toml` (or the platform
//! equivalent); a missing file yields defaults.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    AppConfig, DataConfig, EditorConfig, LocationConfig, LoggingConfig, StoreConfig,
};
