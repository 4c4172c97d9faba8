//! Utility modules for keystore-inspect
//!
//! This module contains the error types shared by every layer.

pub mod error;

pub use error::{
    CertificateError, ConfigError, FieldError, LoadError, Result, TlsContextError, ToolkitError,
};
