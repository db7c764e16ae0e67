//! Contracts of the collaborators the presentation core depends on,
//! plus in-process implementations of them.
//!
//! - `repository.rs` - marker and last-position persistence ports
//! - `device.rs` - location provider, gallery and permission ports
//! - `memory.rs` - in-memory repositories (tests, driver)
//! - `file.rs` - JSON file store implementing both repositories
//! - `simulated.rs` - scripted location provider, static gallery/permissions
//! - `retry.rs` - bounded retry for live marker reads

mod device;
mod error;
mod file;
mod memory;
mod repository;
mod retry;
mod simulated;

pub use device::{GalleryProvider, LocationProvider, Permission, PermissionGate};
pub use error::{GalleryError, RepositoryError};
pub use file::JsonFileStore;
pub use memory::{InMemoryMarkerRepository, InMemoryPositionRepository};
pub use repository::{LastPositionRepository, MarkerRepository};
pub use retry::{observe_markers, RetryPolicy};
pub use simulated::{SimulatedLocationProvider, StaticGallery, StaticPermissions};
