//! Domain entities shared by every component.

mod camera;
mod geo;
mod location;
mod marker;
mod validation;

pub use camera::{CameraPosition, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
pub use geo::{haversine_km, sort_nearest_first, LatLng, EARTH_RADIUS_KM};
pub use location::LocationStatus;
pub use marker::{GeoMarker, MarkerId, MarkersState, NEW_MARKER_ID};
pub use validation::{validate_marker_form, ValidationError, ValidationErrors, DESCRIPTION_MAX_CHARS};
