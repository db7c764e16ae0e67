//! Main screen: map, bottom sheet and the shared marker list.

mod component;
mod executor;
mod intent;
mod reducer;
mod state;

pub use component::{GeoMarkerComponent, GeoMarkerOutput};
pub use executor::{GeoMarkerAction, GeoMarkerExecutor};
pub use intent::{GeoMarkerIntent, GeoMarkerLabel};
pub use reducer::{GeoMarkerMessage, GeoMarkerReducer};
pub use state::GeoMarkerState;
