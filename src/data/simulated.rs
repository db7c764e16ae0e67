//! Scripted device collaborators for the driver binary and tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;

use super::device::{GalleryProvider, LocationProvider, Permission, PermissionGate};
use super::error::GalleryError;
use crate::domain::{LatLng, LocationStatus};

/// Location provider whose fixes are pushed by hand.
///
/// Fixes pushed while the provider is stopped are ignored, like a real
/// provider that is not delivering updates.
pub struct SimulatedLocationProvider {
    status: watch::Sender<LocationStatus>,
    running: AtomicBool,
    start_calls: AtomicUsize,
    last_interval: Mutex<Option<Duration>>,
}

impl SimulatedLocationProvider {
    pub fn new() -> Self {
        Self {
            status: watch::channel(LocationStatus::Initial).0,
            running: AtomicBool::new(false),
            start_calls: AtomicUsize::new(0),
            last_interval: Mutex::new(None),
        }
    }

    pub fn push_fix(&self, point: LatLng) {
        if self.is_running() {
            self.status.send_replace(LocationStatus::Available(point));
        }
    }

    /// Report the provider as unavailable (e.g. location services off).
    pub fn report_unavailable(&self, message: &str) {
        if self.is_running() {
            self.status
                .send_replace(LocationStatus::Error(message.to_string()));
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn last_interval(&self) -> Option<Duration> {
        *self.last_interval.lock()
    }
}

impl Default for SimulatedLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn start(&self, min_interval: Duration) {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_interval.lock() = Some(min_interval);
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.status.send_replace(LocationStatus::Initial);
    }

    fn status(&self) -> watch::Receiver<LocationStatus> {
        self.status.subscribe()
    }
}

/// Gallery with a fixed image list and queued camera results.
pub struct StaticGallery {
    images: Vec<String>,
    captures: Mutex<VecDeque<Option<String>>>,
    listing_fails: AtomicBool,
}

impl StaticGallery {
    pub fn new<I, S>(images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            images: images.into_iter().map(Into::into).collect(),
            captures: Mutex::new(VecDeque::new()),
            listing_fails: AtomicBool::new(false),
        }
    }

    /// Queue the result of the next `capture_photo` call.
    pub fn queue_capture(&self, uri: Option<&str>) {
        self.captures.lock().push_back(uri.map(str::to_string));
    }

    pub fn set_listing_fails(&self, fails: bool) {
        self.listing_fails.store(fails, Ordering::SeqCst);
    }
}

#[async_trait]
impl GalleryProvider for StaticGallery {
    async fn list_image_uris(&self) -> Result<Vec<String>, GalleryError> {
        if self.listing_fails.load(Ordering::SeqCst) {
            return Err(GalleryError::AccessDenied);
        }
        Ok(self.images.clone())
    }

    async fn capture_photo(&self) -> Result<Option<String>, GalleryError> {
        Ok(self.captures.lock().pop_front().flatten())
    }
}

/// Permission signals set directly rather than through a prompt.
pub struct StaticPermissions {
    signals: Mutex<HashMap<Permission, watch::Sender<bool>>>,
}

impl StaticPermissions {
    pub fn all_granted() -> Self {
        Self::with_default(true)
    }

    pub fn all_denied() -> Self {
        Self::with_default(false)
    }

    fn with_default(granted: bool) -> Self {
        let signals = [Permission::Location, Permission::Media, Permission::Camera]
            .into_iter()
            .map(|p| (p, watch::channel(granted).0))
            .collect();
        Self {
            signals: Mutex::new(signals),
        }
    }

    pub fn set(&self, permission: Permission, granted: bool) {
        let mut signals = self.signals.lock();
        let signal = signals
            .entry(permission)
            .or_insert_with(|| watch::channel(granted).0);
        signal.send_replace(granted);
    }
}

impl PermissionGate for StaticPermissions {
    fn granted(&self, permission: Permission) -> watch::Receiver<bool> {
        let mut signals = self.signals.lock();
        signals
            .entry(permission)
            .or_insert_with(|| watch::channel(false).0)
            .subscribe()
    }
}
