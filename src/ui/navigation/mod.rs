mod stack;

pub use stack::{ChildStack, NavigationError};
