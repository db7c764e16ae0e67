//! Presentation layer: one store per screen, composed into a navigation tree.
//!
//! ```text
//! RootComponent
//! ├── GeoMarkerComponent
//! │   ├── MapComponent
//! │   └── SheetComponent ── MarkerListComponent / MarkerDetailsComponent
//! └── EditorComponent
//!     ├── MapComponent
//!     └── ImagePickerComponent (while open)
//! ```

pub mod dependencies;
pub mod editor;
pub mod geomarker;
pub mod image_picker;
pub mod map;
pub mod marker_details;
pub mod marker_list;
pub mod mvi;
pub mod navigation;
pub mod root;
pub mod sheet;

pub use dependencies::{Dependencies, Settings};
