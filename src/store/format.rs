//! Keystore format identifiers

use crate::utils::LoadError;
use std::fmt;
use std::str::FromStr;

/// On-disk container formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreFormat {
    /// PKCS#12 / PFX, the platform default keystore type
    #[default]
    Pkcs12,
    /// A bundle of PEM blocks
    Pem,
}

impl StoreFormat {
    /// Resolve an optional identifier, falling back to the default format.
    pub fn resolve(identifier: Option<&str>) -> Result<Self, LoadError> {
        match identifier.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(id) => id.parse(),
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreFormat::Pkcs12 => write!(f, "PKCS12"),
            StoreFormat::Pem => write!(f, "PEM"),
        }
    }
}

impl FromStr for StoreFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pkcs12" | "pkcs#12" | "p12" | "pfx" => Ok(StoreFormat::Pkcs12),
            "pem" => Ok(StoreFormat::Pem),
            _ => Err(LoadError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}
