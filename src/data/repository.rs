//! Persistence ports.

use async_trait::async_trait;
use tokio::sync::watch;

use super::error::RepositoryError;
use crate::domain::{GeoMarker, LatLng, MarkerId};

/// Marker persistence.
///
/// Live reads are `watch` receivers: the latest value is always available
/// and every write is observed by all open receivers.
#[async_trait]
pub trait MarkerRepository: Send + Sync {
    /// Insert-or-replace keyed on `marker.id`.
    ///
    /// A marker with id 0 is inserted and receives a fresh id, which is
    /// returned. Otherwise the stored marker with that id is replaced.
    async fn save_marker(&self, marker: &GeoMarker) -> Result<MarkerId, RepositoryError>;

    async fn delete_marker(&self, id: MarkerId) -> Result<(), RepositoryError>;

    /// Open a live view of all markers.
    async fn markers(&self) -> Result<watch::Receiver<Vec<GeoMarker>>, RepositoryError>;

    /// Open a live view of one marker; `None` while it does not exist.
    async fn marker_by_id(
        &self,
        id: MarkerId,
    ) -> Result<watch::Receiver<Option<GeoMarker>>, RepositoryError>;
}

/// Last map viewpoint, stored independently of markers.
#[async_trait]
pub trait LastPositionRepository: Send + Sync {
    async fn last_position(&self) -> Result<Option<LatLng>, RepositoryError>;

    fn last_position_stream(&self) -> watch::Receiver<Option<LatLng>>;

    async fn update_last_position(&self, position: LatLng) -> Result<(), RepositoryError>;
}
