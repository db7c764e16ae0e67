use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ImagePickerIntent {
    /// Toggle `uri` in the selection.
    ImageClicked(String),
    OpenCameraClicked,
    ConfirmClicked,
    CancelClicked,
}

impl Intent for ImagePickerIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum ImagePickerLabel {
    Confirmed(Vec<String>),
    Cancelled,
}
