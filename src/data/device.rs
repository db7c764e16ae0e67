//! Device ports: location, media and permissions.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use super::error::GalleryError;
use crate::domain::LocationStatus;

/// Source of device location fixes.
///
/// Callers must hold the location permission before calling `start`.
/// Unavailability is reported as `LocationStatus::Error` on the status
/// stream, never as a returned error.
pub trait LocationProvider: Send + Sync {
    fn start(&self, min_interval: Duration);

    fn stop(&self);

    fn status(&self) -> watch::Receiver<LocationStatus>;
}

#[async_trait]
pub trait GalleryProvider: Send + Sync {
    async fn list_image_uris(&self) -> Result<Vec<String>, GalleryError>;

    /// Take a photo; `None` when the user backed out of the camera.
    async fn capture_photo(&self) -> Result<Option<String>, GalleryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Location,
    Media,
    Camera,
}

/// Outcome of the platform permission flow, one signal per permission.
pub trait PermissionGate: Send + Sync {
    fn granted(&self, permission: Permission) -> watch::Receiver<bool>;
}
