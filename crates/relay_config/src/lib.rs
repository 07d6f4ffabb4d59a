//! Parsing and validation of `relay.toml` engine configuration files.
//!
//! Every section is optional; an empty file (or no file at all) yields the
//! engine defaults. See [`ProjectConfig`] for the recognized keys.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
