use thiserror::Error;

use crate::domain::MarkerId;

/// Errors reported by persistence collaborators.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Marker {id} not found")]
    NotFound { id: MarkerId },

    #[error("Failed to write '{path}': {message}")]
    Write { path: String, message: String },

    #[error("Failed to decode '{path}': {message}")]
    Decode { path: String, message: String },
}

/// Errors reported by the gallery/camera collaborator.
#[derive(Debug, Clone, Error)]
pub enum GalleryError {
    #[error("Media access denied")]
    AccessDenied,

    #[error("Camera access denied")]
    CameraDenied,

    #[error("Gallery query failed: {0}")]
    Query(String),

    #[error("Camera capture failed: {0}")]
    Capture(String),
}
