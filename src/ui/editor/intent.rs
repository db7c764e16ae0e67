use crate::domain::{CameraPosition, MarkerId};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    TitleChanged(String),
    DescriptionChanged(String),
    LocationChanged(CameraPosition),
    SaveClicked,
    DeleteClicked,
    AddImagesClicked,
    RemoveImage(String),
    /// Selection confirmed in the image picker.
    ImagesPicked(Vec<String>),
    ImagePickerDismissed,
    BackClicked,
}

impl Intent for EditorIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorLabel {
    Saved(MarkerId),
    Deleted(MarkerId),
    Back,
    /// Open the picker seeded with the current selection.
    OpenImagePicker(Vec<String>),
}
