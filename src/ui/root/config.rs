use serde::{Deserialize, Serialize};

use crate::domain::GeoMarker;

/// Top-level destinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RootConfig {
    GeoMarkers,
    Editor(EditorTarget),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorTarget {
    Add,
    /// The marker is carried whole so a restored stack can rebuild the form.
    Edit(GeoMarker),
}

impl EditorTarget {
    pub fn marker(&self) -> Option<&GeoMarker> {
        match self {
            EditorTarget::Add => None,
            EditorTarget::Edit(marker) => Some(marker),
        }
    }
}
