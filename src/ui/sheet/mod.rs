mod component;

pub use component::{SheetChild, SheetComponent, SheetConfig, SheetOutput};
