//! Single marker view: text, image carousel, edit entry point.

mod component;
mod executor;
mod intent;
mod reducer;
mod state;

pub use component::MarkerDetailsComponent;
pub use executor::{MarkerDetailsAction, MarkerDetailsExecutor};
pub use intent::{MarkerDetailsIntent, MarkerDetailsLabel};
pub use reducer::{MarkerDetailsMessage, MarkerDetailsReducer};
pub use state::{DetailsContent, MarkerDetailsState};
