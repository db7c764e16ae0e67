use crate::domain::{CameraPosition, GeoMarker, LocationStatus};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub location: LocationStatus,
    /// `None` until something positioned the camera.
    pub camera: Option<CameraPosition>,
    pub markers: Vec<GeoMarker>,
    pub selected_marker: Option<GeoMarker>,
    /// Cleared by the first location fix, which recenters the camera.
    pub is_first_location: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            location: LocationStatus::Initial,
            camera: None,
            markers: Vec::new(),
            selected_marker: None,
            is_first_location: true,
        }
    }
}

impl UiState for MapState {}
