use crate::domain::{GeoMarker, LatLng, MarkersState};
use crate::ui::mvi::Reducer;

use super::state::MarkerListState;

#[derive(Debug, Clone)]
pub enum MarkerListMessage {
    Loading,
    Failed(String),
    Arranged {
        markers: Vec<GeoMarker>,
        origin: Option<LatLng>,
    },
    /// The device moved without changing the list's order.
    OriginMoved(LatLng),
}

pub struct MarkerListReducer;

impl Reducer for MarkerListReducer {
    type State = MarkerListState;
    type Message = MarkerListMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            MarkerListMessage::Loading => MarkerListState {
                markers: MarkersState::Loading,
                ..state
            },
            MarkerListMessage::Failed(error) => MarkerListState {
                markers: MarkersState::Error(error),
                ..state
            },
            MarkerListMessage::Arranged { markers, origin } => MarkerListState {
                markers: MarkersState::Loaded(markers),
                origin,
            },
            MarkerListMessage::OriginMoved(origin) => MarkerListState {
                origin: Some(origin),
                ..state
            },
        }
    }
}
