//! Configuration module for keystore-inspect
//!
//! Handles loading settings from TOML files.

pub mod settings;

pub use settings::{KeystoreSettings, OutputSettings, Settings, DEFAULT_PASSWORD};

use crate::utils::ConfigError;
use std::path::Path;

/// Load settings from `path`, or from the default location when no path is given
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load_default(),
    }
}
