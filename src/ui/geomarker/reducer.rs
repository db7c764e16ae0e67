use crate::domain::{MarkerId, MarkersState};
use crate::ui::mvi::Reducer;

use super::state::GeoMarkerState;

#[derive(Debug, Clone)]
pub enum GeoMarkerMessage {
    MarkersChanged(MarkersState),
    SelectionChanged(Option<MarkerId>),
}

pub struct GeoMarkerReducer;

impl Reducer for GeoMarkerReducer {
    type State = GeoMarkerState;
    type Message = GeoMarkerMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            GeoMarkerMessage::MarkersChanged(markers) => GeoMarkerState { markers, ..state },
            GeoMarkerMessage::SelectionChanged(selected_marker_id) => GeoMarkerState {
                selected_marker_id,
                ..state
            },
        }
    }
}
