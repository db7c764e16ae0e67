use serde::{Deserialize, Serialize};

use super::geo::LatLng;

pub type MarkerId = i64;

/// Id carried by a marker that has never been saved.
pub const NEW_MARKER_ID: MarkerId = 0;

/// A user-created point of interest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoMarker {
    pub id: MarkerId,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub images_uri: Vec<String>,
}

impl GeoMarker {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_MARKER_ID
    }
}

/// Marker list as seen by a screen.
///
/// `Loaded(vec![])` is an empty list; `Error` means it could not be read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MarkersState {
    #[default]
    Loading,
    Loaded(Vec<GeoMarker>),
    Error(String),
}

impl MarkersState {
    pub fn markers(&self) -> &[GeoMarker] {
        match self {
            MarkersState::Loaded(markers) => markers,
            _ => &[],
        }
    }

    pub fn find(&self, id: MarkerId) -> Option<&GeoMarker> {
        self.markers().iter().find(|marker| marker.id == id)
    }
}
