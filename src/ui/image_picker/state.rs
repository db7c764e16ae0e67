use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImagePickerState {
    /// Gallery contents, newest capture first.
    pub available_images_uri: Vec<String>,
    /// Selection in click order.
    pub selected_images_uri: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ImagePickerState {
    pub fn is_selected(&self, uri: &str) -> bool {
        self.selected_images_uri.iter().any(|selected| selected == uri)
    }
}

impl UiState for ImagePickerState {}
