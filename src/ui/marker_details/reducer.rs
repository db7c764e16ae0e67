use crate::domain::GeoMarker;
use crate::ui::mvi::Reducer;

use super::state::{DetailsContent, MarkerDetailsState};

#[derive(Debug, Clone)]
pub enum MarkerDetailsMessage {
    MarkerUpdated(Option<GeoMarker>),
    LoadFailed(String),
    ImageSelected(usize),
}

pub struct MarkerDetailsReducer;

impl Reducer for MarkerDetailsReducer {
    type State = MarkerDetailsState;
    type Message = MarkerDetailsMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            MarkerDetailsMessage::MarkerUpdated(Some(marker)) => {
                let next = MarkerDetailsState {
                    content: DetailsContent::Loaded(marker),
                    ..state
                };
                // The image list may have shrunk.
                let selected_image = next.clamp_index(next.selected_image);
                MarkerDetailsState {
                    selected_image,
                    ..next
                }
            }
            MarkerDetailsMessage::MarkerUpdated(None) => MarkerDetailsState {
                content: DetailsContent::Missing,
                selected_image: 0,
                ..state
            },
            MarkerDetailsMessage::LoadFailed(error) => MarkerDetailsState {
                content: DetailsContent::Error(error),
                ..state
            },
            MarkerDetailsMessage::ImageSelected(index) => {
                let selected_image = state.clamp_index(index);
                MarkerDetailsState {
                    selected_image,
                    ..state
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_images(count: usize) -> GeoMarker {
        GeoMarker {
            id: 1,
            images_uri: (0..count).map(|i| format!("img{i}")).collect(),
            ..GeoMarker::default()
        }
    }

    #[test]
    fn selection_is_clamped_to_images() {
        let state = MarkerDetailsReducer::reduce(
            MarkerDetailsState::default(),
            MarkerDetailsMessage::MarkerUpdated(Some(with_images(3))),
        );
        let state = MarkerDetailsReducer::reduce(state, MarkerDetailsMessage::ImageSelected(7));
        assert_eq!(state.selected_image, 2);
        assert_eq!(state.current_image(), Some("img2"));
    }

    #[test]
    fn shrinking_image_list_moves_selection() {
        let state = MarkerDetailsState {
            content: DetailsContent::Loaded(with_images(3)),
            selected_image: 2,
            ..MarkerDetailsState::default()
        };
        let state = MarkerDetailsReducer::reduce(
            state,
            MarkerDetailsMessage::MarkerUpdated(Some(with_images(1))),
        );
        assert_eq!(state.selected_image, 0);
    }

    #[test]
    fn deleted_marker_is_missing() {
        let state = MarkerDetailsReducer::reduce(
            MarkerDetailsState::default(),
            MarkerDetailsMessage::MarkerUpdated(None),
        );
        assert_eq!(state.content, DetailsContent::Missing);
        assert!(state.marker().is_none());
    }
}
