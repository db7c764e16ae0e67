//! Reducer for the map.

use crate::domain::{CameraPosition, GeoMarker, LocationStatus};
use crate::ui::mvi::Reducer;

use super::state::MapState;

#[derive(Debug, Clone)]
pub enum MapMessage {
    LocationChanged(LocationStatus),
    CameraMoved(CameraPosition),
    FirstLocationConsumed,
    MarkersChanged(Vec<GeoMarker>),
    MarkerSelected(Option<GeoMarker>),
}

pub struct MapReducer;

impl Reducer for MapReducer {
    type State = MapState;
    type Message = MapMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            MapMessage::LocationChanged(location) => MapState { location, ..state },
            MapMessage::CameraMoved(camera) => MapState {
                camera: Some(camera),
                ..state
            },
            MapMessage::FirstLocationConsumed => MapState {
                is_first_location: false,
                ..state
            },
            MapMessage::MarkersChanged(markers) => {
                // Keep the selection pointing at the fresh copy, or drop it
                // if the marker is gone.
                let selected_marker = state
                    .selected_marker
                    .as_ref()
                    .and_then(|selected| markers.iter().find(|m| m.id == selected.id))
                    .cloned();
                MapState {
                    markers,
                    selected_marker,
                    ..state
                }
            }
            MapMessage::MarkerSelected(selected_marker) => MapState {
                selected_marker,
                ..state
            },
        }
    }
}
