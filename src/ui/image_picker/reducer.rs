use crate::ui::mvi::Reducer;

use super::state::ImagePickerState;

#[derive(Debug, Clone)]
pub enum ImagePickerMessage {
    LoadStarted,
    ImagesLoaded(Vec<String>),
    LoadFailed(String),
    SelectionToggled(String),
    /// Put back a URI that the previous click removed, at its old index.
    SelectionRestored { uri: String, index: usize },
    /// A fresh photo: listed first and selected.
    PhotoCaptured(String),
    CaptureFailed(String),
    SelectionReset(Vec<String>),
}

pub struct ImagePickerReducer;

impl Reducer for ImagePickerReducer {
    type State = ImagePickerState;
    type Message = ImagePickerMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            ImagePickerMessage::LoadStarted => ImagePickerState {
                loading: true,
                error: None,
                ..state
            },
            ImagePickerMessage::ImagesLoaded(available_images_uri) => ImagePickerState {
                available_images_uri,
                loading: false,
                error: None,
                ..state
            },
            ImagePickerMessage::LoadFailed(error) | ImagePickerMessage::CaptureFailed(error) => {
                ImagePickerState {
                    loading: false,
                    error: Some(error),
                    ..state
                }
            }
            ImagePickerMessage::SelectionToggled(uri) => ImagePickerState {
                selected_images_uri: toggle_selection(state.selected_images_uri, uri),
                ..state
            },
            ImagePickerMessage::SelectionRestored { uri, index } => {
                let mut selected = state.selected_images_uri;
                if !selected.contains(&uri) {
                    selected.insert(index.min(selected.len()), uri);
                }
                ImagePickerState {
                    selected_images_uri: selected,
                    ..state
                }
            }
            ImagePickerMessage::PhotoCaptured(uri) => {
                let mut available = state.available_images_uri;
                if !available.contains(&uri) {
                    available.insert(0, uri.clone());
                }
                let mut selected = state.selected_images_uri;
                if !selected.contains(&uri) {
                    selected.push(uri);
                }
                ImagePickerState {
                    available_images_uri: available,
                    selected_images_uri: selected,
                    error: None,
                    ..state
                }
            }
            ImagePickerMessage::SelectionReset(selected_images_uri) => ImagePickerState {
                selected_images_uri,
                ..state
            },
        }
    }
}

/// Append `uri` if absent, remove it if present. Order is preserved.
pub fn toggle_selection(mut selection: Vec<String>, uri: String) -> Vec<String> {
    match selection.iter().position(|selected| *selected == uri) {
        Some(index) => {
            selection.remove(index);
        }
        None => selection.push(uri),
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uris(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn toggle_appends_then_removes() {
        let selection = toggle_selection(uris(&["a"]), "b".to_string());
        assert_eq!(selection, uris(&["a", "b"]));
        let selection = toggle_selection(selection, "a".to_string());
        assert_eq!(selection, uris(&["b"]));
    }

    #[test]
    fn toggle_twice_restores_selection() {
        let original = uris(&["a", "b", "c"]);
        let once = toggle_selection(original.clone(), "d".to_string());
        assert_eq!(once, uris(&["a", "b", "c", "d"]));
        assert_eq!(toggle_selection(once, "d".to_string()), original);
    }

    #[test]
    fn toggle_never_duplicates() {
        let selection = toggle_selection(uris(&["a"]), "b".to_string());
        let selection = toggle_selection(selection, "b".to_string());
        let selection = toggle_selection(selection, "b".to_string());
        assert_eq!(selection, uris(&["a", "b"]));
    }

    #[test]
    fn restore_puts_uri_back_in_place() {
        let state = ImagePickerState {
            selected_images_uri: uris(&["a", "c"]),
            ..ImagePickerState::default()
        };
        let state = ImagePickerReducer::reduce(
            state,
            ImagePickerMessage::SelectionRestored {
                uri: "b".into(),
                index: 1,
            },
        );
        assert_eq!(state.selected_images_uri, uris(&["a", "b", "c"]));

        let state = ImagePickerReducer::reduce(
            state,
            ImagePickerMessage::SelectionRestored {
                uri: "z".into(),
                index: 10,
            },
        );
        assert_eq!(state.selected_images_uri, uris(&["a", "b", "c", "z"]));
    }

    #[test]
    fn captured_photo_is_listed_first_and_selected() {
        let state = ImagePickerState {
            available_images_uri: uris(&["a", "b"]),
            selected_images_uri: uris(&["b"]),
            ..ImagePickerState::default()
        };
        let state = ImagePickerReducer::reduce(state, ImagePickerMessage::PhotoCaptured("p".into()));
        assert_eq!(state.available_images_uri, uris(&["p", "a", "b"]));
        assert_eq!(state.selected_images_uri, uris(&["b", "p"]));
    }

    #[test]
    fn load_failure_is_not_empty() {
        let state = ImagePickerReducer::reduce(ImagePickerState::default(), ImagePickerMessage::LoadStarted);
        assert!(state.loading);
        let state = ImagePickerReducer::reduce(state, ImagePickerMessage::LoadFailed("denied".into()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("denied"));
    }
}
