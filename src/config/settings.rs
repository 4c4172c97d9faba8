//! Application settings configuration
//!
//! Defines the default keystore location, credentials and output preferences.

use crate::cli::OutputFormat;
use crate::store::StoreFormat;
use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Password tried when none is supplied anywhere
pub const DEFAULT_PASSWORD: &str = "changeit";

/// Keystore settings
#[derive(Debug, Clone, Deserialize)]
pub struct KeystoreSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default)]
    pub store_type: Option<String>,
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

impl Default for KeystoreSettings {
    fn default() -> Self {
        Self {
            path: None,
            password: default_password(),
            store_type: None,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keystore: KeystoreSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(store_type) = &self.keystore.store_type {
            store_type
                .parse::<StoreFormat>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "keystore.store_type".to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}
