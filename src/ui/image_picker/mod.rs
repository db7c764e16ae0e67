mod component;
mod executor;
mod intent;
mod reducer;
mod state;

pub use component::ImagePickerComponent;
pub use executor::{ImagePickerAction, ImagePickerExecutor};
pub use intent::{ImagePickerIntent, ImagePickerLabel};
pub use reducer::{toggle_selection, ImagePickerMessage, ImagePickerReducer};
pub use state::ImagePickerState;
