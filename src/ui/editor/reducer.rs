use crate::domain::{CameraPosition, ValidationError, ValidationErrors, DESCRIPTION_MAX_CHARS};
use crate::ui::mvi::Reducer;

use super::state::{EditorState, SaveStatus};

#[derive(Debug, Clone)]
pub enum EditorMessage {
    TitleChanged(String),
    DescriptionChanged(String),
    LocationChanged(CameraPosition),
    Validated(ValidationErrors),
    SaveStatusChanged(SaveStatus),
    ImagePickerShown(bool),
    ImagesReplaced(Vec<String>),
    ImageRemoved(String),
}

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Message = EditorMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            EditorMessage::TitleChanged(title) => {
                let mut validation_errors = state.validation_errors;
                if !title.trim().is_empty() {
                    validation_errors.remove(ValidationError::TitleEmpty);
                }
                EditorState {
                    title,
                    validation_errors,
                    ..state
                }
            }
            EditorMessage::DescriptionChanged(description) => {
                let mut validation_errors = state.validation_errors;
                if description.chars().count() <= DESCRIPTION_MAX_CHARS {
                    validation_errors.remove(ValidationError::DescriptionTooLong);
                }
                EditorState {
                    description,
                    validation_errors,
                    ..state
                }
            }
            EditorMessage::LocationChanged(location) => {
                // A location unblocks a save that was waiting for one.
                let save_status = match state.save_status {
                    SaveStatus::AwaitingLocation => SaveStatus::Idle,
                    other => other,
                };
                EditorState {
                    location: Some(location),
                    save_status,
                    ..state
                }
            }
            EditorMessage::Validated(validation_errors) => EditorState {
                validation_errors,
                ..state
            },
            EditorMessage::SaveStatusChanged(save_status) => EditorState {
                save_status,
                ..state
            },
            EditorMessage::ImagePickerShown(show_image_picker) => EditorState {
                show_image_picker,
                ..state
            },
            EditorMessage::ImagesReplaced(selected_images) => EditorState {
                selected_images,
                ..state
            },
            EditorMessage::ImageRemoved(uri) => {
                let mut selected_images = state.selected_images;
                selected_images.retain(|selected| *selected != uri);
                EditorState {
                    selected_images,
                    ..state
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{validate_marker_form, LatLng};

    #[test]
    fn typing_a_title_clears_title_error() {
        let state = EditorState {
            validation_errors: validate_marker_form("", ""),
            ..EditorState::default()
        };
        assert!(state.validation_errors.contains(ValidationError::TitleEmpty));

        let state = EditorReducer::reduce(state, EditorMessage::TitleChanged("   ".into()));
        assert!(state.validation_errors.contains(ValidationError::TitleEmpty));

        let state = EditorReducer::reduce(state, EditorMessage::TitleChanged("Cafe".into()));
        assert!(state.validation_errors.is_valid());
    }

    #[test]
    fn shortening_description_clears_length_error() {
        let long = "x".repeat(DESCRIPTION_MAX_CHARS + 1);
        let state = EditorState {
            validation_errors: validate_marker_form("t", &long),
            ..EditorState::default()
        };
        let state = EditorReducer::reduce(state, EditorMessage::DescriptionChanged(long));
        assert!(state.validation_errors.contains(ValidationError::DescriptionTooLong));

        let state = EditorReducer::reduce(state, EditorMessage::DescriptionChanged("short".into()));
        assert!(state.validation_errors.is_valid());
    }

    #[test]
    fn location_unblocks_pending_save() {
        let state = EditorState {
            save_status: SaveStatus::AwaitingLocation,
            ..EditorState::default()
        };
        let camera = CameraPosition::centered(LatLng::new(1.0, 1.0), 15.0);
        let state = EditorReducer::reduce(state, EditorMessage::LocationChanged(camera));
        assert_eq!(state.save_status, SaveStatus::Idle);
        assert_eq!(state.location, Some(camera));
    }

    #[test]
    fn location_keeps_failure_visible() {
        let state = EditorState {
            save_status: SaveStatus::Failed("disk full".into()),
            ..EditorState::default()
        };
        let camera = CameraPosition::centered(LatLng::new(1.0, 1.0), 15.0);
        let state = EditorReducer::reduce(state, EditorMessage::LocationChanged(camera));
        assert_eq!(state.save_status, SaveStatus::Failed("disk full".into()));
    }

    #[test]
    fn remove_image_drops_only_that_uri() {
        let state = EditorState {
            selected_images: vec!["a".into(), "b".into()],
            ..EditorState::default()
        };
        let state = EditorReducer::reduce(state, EditorMessage::ImageRemoved("a".into()));
        assert_eq!(state.selected_images, vec!["b".to_string()]);
    }
}
