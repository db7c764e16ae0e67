use crate::domain::GeoMarker;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum MarkerDetailsIntent {
    ImageSelected(usize),
    NextImage,
    PreviousImage,
    EditClicked,
    BackClicked,
}

impl Intent for MarkerDetailsIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerDetailsLabel {
    Edit(GeoMarker),
    Back,
}
