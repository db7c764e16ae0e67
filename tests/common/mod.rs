//! Shared test utilities: in-process collaborators and wait helpers.

#![allow(dead_code, unused_imports)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use geomarker::data::{
    InMemoryMarkerRepository, InMemoryPositionRepository, Permission, SimulatedLocationProvider,
    StaticGallery, StaticPermissions,
};
use geomarker::domain::{GeoMarker, LatLng};
use geomarker::location::LocationTracker;
use geomarker::ui::mvi::LabelReceiver;
use geomarker::ui::{Dependencies, Settings};
use parking_lot::Mutex;
use tokio::sync::watch;

/// Upper bound for anything a test waits on.
pub const WAIT: Duration = Duration::from_secs(2);

/// Every collaborator a component tree needs, with handles kept for
/// scripting and assertions.
pub struct Harness {
    pub markers: Arc<InMemoryMarkerRepository>,
    pub positions: Arc<InMemoryPositionRepository>,
    pub location: Arc<SimulatedLocationProvider>,
    pub tracker: Arc<LocationTracker>,
    pub gallery: Arc<StaticGallery>,
    pub permissions: Arc<StaticPermissions>,
    pub deps: Arc<Dependencies>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_markers(Vec::new())
    }

    /// Media and camera granted, location denied so nothing tracks.
    pub fn with_markers(markers: Vec<GeoMarker>) -> Self {
        let permissions = StaticPermissions::all_granted();
        permissions.set(Permission::Location, false);
        Self::build(InMemoryMarkerRepository::with_markers(markers), permissions)
    }

    /// Location permission granted up front.
    pub fn granted(markers: Vec<GeoMarker>) -> Self {
        Self::build(
            InMemoryMarkerRepository::with_markers(markers),
            StaticPermissions::all_granted(),
        )
    }

    fn build(markers: InMemoryMarkerRepository, permissions: StaticPermissions) -> Self {
        let markers = Arc::new(markers);
        let positions = Arc::new(InMemoryPositionRepository::new(None));
        let location = Arc::new(SimulatedLocationProvider::new());
        let tracker = Arc::new(LocationTracker::new(location.clone()));
        let gallery = Arc::new(StaticGallery::new([
            "content://media/1",
            "content://media/2",
            "content://media/3",
        ]));
        let permissions = Arc::new(permissions);
        let deps = Arc::new(Dependencies {
            markers: markers.clone(),
            last_position: positions.clone(),
            tracker: tracker.clone(),
            gallery: gallery.clone(),
            permissions: permissions.clone(),
            settings: test_settings(),
        });
        Self {
            markers,
            positions,
            location,
            tracker,
            gallery,
            permissions,
            deps,
        }
    }
}

pub fn test_settings() -> Settings {
    Settings {
        retry: geomarker::data::RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(20),
        },
        ..Settings::default()
    }
}

pub fn marker(id: i64, title: &str, latitude: f64, longitude: f64) -> GeoMarker {
    GeoMarker {
        id,
        title: title.to_string(),
        description: String::new(),
        latitude,
        longitude,
        images_uri: Vec::new(),
    }
}

/// Wait until the watched value satisfies `predicate` and return it.
pub async fn wait_for<T, F>(rx: &mut watch::Receiver<T>, predicate: F) -> T
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let result = tokio::time::timeout(WAIT, async {
        loop {
            {
                let value = rx.borrow_and_update();
                if predicate(&value) {
                    return value.clone();
                }
            }
            if rx.changed().await.is_err() {
                panic!("watched value closed before condition held");
            }
        }
    })
    .await;
    match result {
        Ok(value) => value,
        Err(_) => panic!("condition not reached within {:?}", WAIT),
    }
}

/// Poll `condition` until it holds.
pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    let result = tokio::time::timeout(WAIT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(result.is_ok(), "condition not reached within {:?}", WAIT);
}

pub async fn next_label<L>(labels: &mut LabelReceiver<L>) -> L {
    match tokio::time::timeout(WAIT, labels.recv()).await {
        Ok(Some(label)) => label,
        Ok(None) => panic!("label stream closed"),
        Err(_) => panic!("no label within {:?}", WAIT),
    }
}

/// Let spawned tasks run for a moment.
pub async fn quiesce() {
    tokio::time::sleep(Duration::from_millis(30)).await;
}

/// Collects values handed to a component output callback.
#[derive(Clone, Default)]
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sink(&self) -> impl Fn(T) + Send + Sync + 'static {
        let seen = Arc::clone(&self.seen);
        move |value| seen.lock().push(value)
    }

    pub fn values(&self) -> Vec<T> {
        self.seen.lock().clone()
    }

    pub async fn wait_len(&self, len: usize) -> Vec<T> {
        let seen = Arc::clone(&self.seen);
        wait_until(move || seen.lock().len() >= len).await;
        self.values()
    }
}
