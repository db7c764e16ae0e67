//! Collaborators and settings handed down the component tree.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::data::{
    GalleryProvider, LastPositionRepository, MarkerRepository, PermissionGate, RetryPolicy,
};
use crate::location::LocationTracker;
use crate::ui::mvi::{StoreOptions, DEFAULT_LABEL_REPLAY_CAPACITY};

/// Tunables derived from [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub location_interval: Duration,
    pub camera_restore_delay: Duration,
    pub retry: RetryPolicy,
    pub label_replay_capacity: usize,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            location_interval: config.location.min_interval(),
            camera_restore_delay: config.editor.camera_restore_delay(),
            retry: config.data.retry_policy(),
            label_replay_capacity: config.store.label_replay_capacity,
        }
    }

    pub fn store_options(&self, name: &'static str) -> StoreOptions {
        StoreOptions::named(name).with_label_replay(self.label_replay_capacity)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            location_interval: Duration::from_secs(5),
            camera_restore_delay: Duration::from_millis(300),
            retry: RetryPolicy::default(),
            label_replay_capacity: DEFAULT_LABEL_REPLAY_CAPACITY,
        }
    }
}

/// Everything a component may need, passed by constructor.
///
/// Parents clone the `Arc` into each child they create; there is no
/// global registry.
pub struct Dependencies {
    pub markers: Arc<dyn MarkerRepository>,
    pub last_position: Arc<dyn LastPositionRepository>,
    pub tracker: Arc<LocationTracker>,
    pub gallery: Arc<dyn GalleryProvider>,
    pub permissions: Arc<dyn PermissionGate>,
    pub settings: Settings,
}
