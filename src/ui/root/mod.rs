mod component;
mod config;

pub use component::{RootChild, RootComponent};
pub use config::{EditorTarget, RootConfig};
