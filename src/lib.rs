pub mod config;
pub mod data;
pub mod domain;
pub mod location;
pub mod logging;
pub mod ui;
