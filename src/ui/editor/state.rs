use crate::domain::{CameraPosition, GeoMarker, MarkerId, ValidationErrors};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Add,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    /// A write is in flight.
    Saving,
    /// The form is valid but no location has been picked yet.
    AwaitingLocation,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub mode: EditorMode,
    pub title: String,
    pub description: String,
    pub location: Option<CameraPosition>,
    pub validation_errors: ValidationErrors,
    pub selected_images: Vec<String>,
    pub show_image_picker: bool,
    pub marker_id: Option<MarkerId>,
    pub save_status: SaveStatus,
}

impl EditorState {
    /// Empty form.
    pub fn add() -> Self {
        Self::default()
    }

    /// Form pre-filled from `marker`. The location is restored later by
    /// the bootstrap, once the map is ready.
    pub fn edit(marker: &GeoMarker) -> Self {
        Self {
            mode: EditorMode::Edit,
            title: marker.title.clone(),
            description: marker.description.clone(),
            selected_images: marker.images_uri.clone(),
            marker_id: Some(marker.id),
            ..Self::default()
        }
    }
}

impl UiState for EditorState {}
