use crate::domain::MarkerId;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum GeoMarkerIntent {
    SelectMarker(MarkerId),
    ClearSelection,
    AddMarkerClicked,
}

impl Intent for GeoMarkerIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum GeoMarkerLabel {
    AddMarker,
}
