//! Marker editor: one store for both adding and editing a marker.
//!
//! The component owns a map child whose camera is the marker's location,
//! and opens an image picker on demand.

mod component;
mod executor;
mod intent;
mod reducer;
mod state;

pub use component::{EditorComponent, EditorOutput};
pub use executor::{EditorAction, EditorExecutor};
pub use intent::{EditorIntent, EditorLabel};
pub use reducer::{EditorMessage, EditorReducer};
pub use state::{EditorMode, EditorState, SaveStatus};
