//! In-memory repositories with failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;

use super::error::RepositoryError;
use super::repository::{LastPositionRepository, MarkerRepository};
use crate::domain::{GeoMarker, LatLng, MarkerId, NEW_MARKER_ID};

/// High-water mark of assigned marker ids.
///
/// Ids are never handed out twice, even after the marker holding the
/// highest id was deleted.
#[derive(Debug, Default)]
pub(crate) struct IdSequence {
    last: AtomicI64,
}

impl IdSequence {
    /// Start above `last` and above every id in `markers`.
    pub(crate) fn resume(last: MarkerId, markers: &[GeoMarker]) -> Self {
        let highest = markers.iter().map(|m| m.id).fold(last, MarkerId::max);
        Self {
            last: AtomicI64::new(highest.max(NEW_MARKER_ID)),
        }
    }

    pub(crate) fn last(&self) -> MarkerId {
        self.last.load(Ordering::SeqCst)
    }

    fn next(&self) -> MarkerId {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn observe(&self, id: MarkerId) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}

/// Insert-or-replace `marker` into `markers`, returning its id.
pub(crate) fn upsert(
    markers: &mut Vec<GeoMarker>,
    marker: &GeoMarker,
    ids: &IdSequence,
) -> MarkerId {
    if marker.is_new() {
        let id = ids.next();
        markers.push(GeoMarker {
            id,
            ..marker.clone()
        });
        return id;
    }

    ids.observe(marker.id);
    match markers.iter_mut().find(|m| m.id == marker.id) {
        Some(existing) => *existing = marker.clone(),
        None => markers.push(marker.clone()),
    }
    marker.id
}

/// Keeps one `watch` cell per requested marker id in sync with the list.
#[derive(Default)]
pub(crate) struct ByIdWatchers {
    cells: Mutex<HashMap<MarkerId, watch::Sender<Option<GeoMarker>>>>,
}

impl ByIdWatchers {
    pub(crate) fn subscribe(
        &self,
        id: MarkerId,
        markers: &[GeoMarker],
    ) -> watch::Receiver<Option<GeoMarker>> {
        let mut cells = self.cells.lock();
        cells.retain(|_, cell| cell.receiver_count() > 0);
        cells
            .entry(id)
            .or_insert_with(|| {
                let current = markers.iter().find(|m| m.id == id).cloned();
                watch::channel(current).0
            })
            .subscribe()
    }

    pub(crate) fn refresh(&self, markers: &[GeoMarker]) {
        for (id, cell) in self.cells.lock().iter() {
            let current = markers.iter().find(|m| m.id == *id).cloned();
            cell.send_if_modified(|value| {
                if *value == current {
                    false
                } else {
                    *value = current;
                    true
                }
            });
        }
    }
}

/// Consume one unit of an injected failure budget.
fn take_failure(budget: &AtomicU32) -> bool {
    budget
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

/// Marker repository kept in process memory.
///
/// Failures can be injected for the next N subscriptions or writes, and
/// every call is counted so tests can assert on collaborator traffic.
pub struct InMemoryMarkerRepository {
    markers: watch::Sender<Vec<GeoMarker>>,
    ids: IdSequence,
    by_id: ByIdWatchers,
    read_failures: AtomicU32,
    write_failures: AtomicU32,
    save_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    subscribe_calls: AtomicUsize,
}

impl InMemoryMarkerRepository {
    pub fn new() -> Self {
        Self::with_markers(Vec::new())
    }

    /// Seed with `markers`; entries with id 0 receive fresh ids.
    pub fn with_markers(markers: Vec<GeoMarker>) -> Self {
        let ids = IdSequence::default();
        let mut seeded = Vec::with_capacity(markers.len());
        for marker in &markers {
            upsert(&mut seeded, marker, &ids);
        }
        Self {
            markers: watch::channel(seeded).0,
            ids,
            by_id: ByIdWatchers::default(),
            read_failures: AtomicU32::new(0),
            write_failures: AtomicU32::new(0),
            save_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
        }
    }

    /// Make the next `count` calls to `markers()` fail.
    pub fn fail_next_reads(&self, count: u32) {
        self.read_failures.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` save/delete calls fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.write_failures.store(count, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<GeoMarker> {
        self.markers.borrow().clone()
    }

    /// Re-publish the current list unchanged, as a database trigger would.
    pub fn touch(&self) {
        self.markers.send_modify(|_| {});
    }
}

impl Default for InMemoryMarkerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarkerRepository for InMemoryMarkerRepository {
    async fn save_marker(&self, marker: &GeoMarker) -> Result<MarkerId, RepositoryError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.write_failures) {
            return Err(RepositoryError::Unavailable("injected write failure".to_string()));
        }

        let mut id = NEW_MARKER_ID;
        self.markers
            .send_modify(|markers| id = upsert(markers, marker, &self.ids));
        self.by_id.refresh(&self.markers.borrow());
        Ok(id)
    }

    async fn delete_marker(&self, id: MarkerId) -> Result<(), RepositoryError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.write_failures) {
            return Err(RepositoryError::Unavailable("injected write failure".to_string()));
        }

        let removed = self.markers.send_if_modified(|markers| {
            let before = markers.len();
            markers.retain(|m| m.id != id);
            markers.len() != before
        });
        if !removed {
            return Err(RepositoryError::NotFound { id });
        }
        self.by_id.refresh(&self.markers.borrow());
        Ok(())
    }

    async fn markers(&self) -> Result<watch::Receiver<Vec<GeoMarker>>, RepositoryError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.read_failures) {
            return Err(RepositoryError::Unavailable("injected read failure".to_string()));
        }
        Ok(self.markers.subscribe())
    }

    async fn marker_by_id(
        &self,
        id: MarkerId,
    ) -> Result<watch::Receiver<Option<GeoMarker>>, RepositoryError> {
        Ok(self.by_id.subscribe(id, &self.markers.borrow()))
    }
}

/// Last-position repository kept in process memory.
pub struct InMemoryPositionRepository {
    position: watch::Sender<Option<LatLng>>,
    updates: AtomicUsize,
}

impl InMemoryPositionRepository {
    pub fn new(initial: Option<LatLng>) -> Self {
        Self {
            position: watch::channel(initial).0,
            updates: AtomicUsize::new(0),
        }
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryPositionRepository {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl LastPositionRepository for InMemoryPositionRepository {
    async fn last_position(&self) -> Result<Option<LatLng>, RepositoryError> {
        Ok(*self.position.borrow())
    }

    fn last_position_stream(&self) -> watch::Receiver<Option<LatLng>> {
        self.position.subscribe()
    }

    async fn update_last_position(&self, position: LatLng) -> Result<(), RepositoryError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.position.send_replace(Some(position));
        Ok(())
    }
}
