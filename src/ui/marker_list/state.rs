use crate::domain::{haversine_km, GeoMarker, LatLng, MarkersState};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerListState {
    /// Sorted nearest-first when `origin` is known, repository order otherwise.
    pub markers: MarkersState,
    /// Latest device position; distances are measured from it. The order
    /// is only recomputed when its size or head would change.
    pub origin: Option<LatLng>,
}

impl MarkerListState {
    pub fn distance_km(&self, marker: &GeoMarker) -> Option<f64> {
        self.origin.map(|origin| haversine_km(origin, marker.position()))
    }
}

impl UiState for MarkerListState {}
