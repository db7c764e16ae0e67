//! Device location tracking.
//!
//! [`LocationTracker`] is the single owner of the provider subscription;
//! every other component only reads its status stream.

mod tracker;

pub use tracker::LocationTracker;
