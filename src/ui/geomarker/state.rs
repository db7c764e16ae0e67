use crate::domain::{GeoMarker, MarkerId, MarkersState};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoMarkerState {
    pub markers: MarkersState,
    pub selected_marker_id: Option<MarkerId>,
}

impl GeoMarkerState {
    pub fn selected_marker(&self) -> Option<&GeoMarker> {
        self.selected_marker_id.and_then(|id| self.markers.find(id))
    }
}

impl UiState for GeoMarkerState {}
