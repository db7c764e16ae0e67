//! Nearest-first marker list shown in the bottom sheet.

mod component;
mod executor;
mod intent;
mod reducer;
mod state;

pub use component::MarkerListComponent;
pub use executor::{MarkerListAction, MarkerListExecutor};
pub use intent::{MarkerListIntent, MarkerListLabel};
pub use reducer::{MarkerListMessage, MarkerListReducer};
pub use state::MarkerListState;
