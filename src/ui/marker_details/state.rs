use crate::domain::{GeoMarker, MarkerId};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailsContent {
    #[default]
    Loading,
    Loaded(GeoMarker),
    /// The marker was deleted while shown.
    Missing,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerDetailsState {
    pub marker_id: MarkerId,
    pub content: DetailsContent,
    /// Carousel position; always a valid index when images exist.
    pub selected_image: usize,
}

impl MarkerDetailsState {
    pub fn marker(&self) -> Option<&GeoMarker> {
        match &self.content {
            DetailsContent::Loaded(marker) => Some(marker),
            _ => None,
        }
    }

    fn image_count(&self) -> usize {
        self.marker().map_or(0, |marker| marker.images_uri.len())
    }

    pub fn current_image(&self) -> Option<&str> {
        self.marker()
            .and_then(|marker| marker.images_uri.get(self.selected_image))
            .map(String::as_str)
    }

    pub(crate) fn clamp_index(&self, index: usize) -> usize {
        index.min(self.image_count().saturating_sub(1))
    }
}

impl UiState for MarkerDetailsState {}
