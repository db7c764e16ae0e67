use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::RetryPolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Device location subscription settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Minimum interval between location fixes in milliseconds (default: 5000).
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

/// Marker editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Delay before an edited marker's position is pushed to the embedded
    /// map, giving the map time to attach (default: 300).
    #[serde(default = "default_camera_restore_delay_ms")]
    pub camera_restore_delay_ms: u64,
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Attempts to open the live marker list before reporting an error (default: 3).
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Fixed delay between attempts in milliseconds (default: 500).
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Directory for marker and navigation files. Defaults to the platform
    /// data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Store runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Labels kept for a subscriber that attaches late (default: 16, 0 disables).
    #[serde(default = "default_label_replay_capacity")]
    pub label_replay_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_min_interval_ms() -> u64 {
    5000
}

fn default_camera_restore_delay_ms() -> u64 {
    300
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_label_replay_capacity() -> usize {
    crate::ui::mvi::DEFAULT_LABEL_REPLAY_CAPACITY
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            camera_restore_delay_ms: default_camera_restore_delay_ms(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            data_dir: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            label_replay_capacity: default_label_replay_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl LocationConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

impl EditorConfig {
    pub fn camera_restore_delay(&self) -> Duration {
        Duration::from_millis(self.camera_restore_delay_ms)
    }
}

impl DataConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    /// Configured data directory, or `<platform data dir>/geomarker`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("geomarker")
        })
    }
}
