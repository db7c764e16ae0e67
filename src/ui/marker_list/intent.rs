use crate::domain::MarkerId;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum MarkerListIntent {
    ItemClicked(MarkerId),
}

impl Intent for MarkerListIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerListLabel {
    Selected(MarkerId),
}
