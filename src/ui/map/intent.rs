use crate::domain::{CameraPosition, GeoMarker, LatLng, MarkerId};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum MapIntent {
    StartLocationUpdates,
    StopLocationUpdates,
    MoveToMyLocation,
    ChangeZoom(f32),
    /// Camera reported by the map view after a gesture or animation.
    UpdateCameraPosition(CameraPosition),
    MarkerClicked(GeoMarker),
    /// Replace the displayed markers (fed by the owning component).
    SetMarkers(Vec<GeoMarker>),
    /// Program-driven recentring, keeping the current zoom.
    CenterOn(LatLng),
    /// Highlight a marker without reporting a click.
    HighlightMarker(Option<MarkerId>),
}

impl Intent for MapIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum MapLabel {
    /// The store applied a new camera position.
    CameraChanged(CameraPosition),
    MarkerClicked(MarkerId),
}
