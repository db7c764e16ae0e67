//! Map feature module.
//!
//! Owns the camera and the overlay (device location, markers, selection).
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Camera, location and overlay state
//! - `intent.rs` - User gestures and parent requests, plus outgoing labels
//! - `reducer.rs` - Messages and state transitions (pure, no side effects)
//! - `executor.rs` - Location subscription, camera dedup, last-position I/O
//! - `component.rs` - Store wiring

mod component;
mod executor;
mod intent;
mod reducer;
mod state;

pub use component::{MapComponent, MapDependencies};
pub use executor::{MapAction, MapExecutor};
pub use intent::{MapIntent, MapLabel};
pub use reducer::{MapMessage, MapReducer};
pub use state::MapState;
