pub mod config;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod registry;
pub mod validate;
