//! Custom error types for keystore-inspect
//!
//! Each failure family gets its own `thiserror` enum. Store-level failures
//! (`LoadError`) end up as the report's single top-level error, while
//! `FieldError` and `CertificateError` stay scoped to one certificate.

use thiserror::Error;

/// Top-level error type for the keystore-inspect application
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Keystore error: {0}")]
    Load(#[from] LoadError),

    #[error("Certificate error: {0}")]
    Certificate(#[from] CertificateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures opening a certificate store. Each condition is a separate variant
/// so callers can tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Keystore file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read keystore {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Malformed keystore {path}: {message}")]
    MalformedStore { path: String, message: String },

    #[error("Keystore password was incorrect or integrity check failed for {path}: {message}")]
    AuthenticationFailure { path: String, message: String },

    #[error("Unsupported keystore format: {format}")]
    UnsupportedFormat { format: String },
}

/// The bytes of a store entry are not a structurally valid X.509 certificate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    #[error("Failed to parse certificate for alias {alias}: {message}")]
    ParseError { alias: String, message: String },
}

/// A failure confined to one sub-field of one certificate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Failed to parse extensions: {message}")]
    Extensions { message: String },

    #[error("Failed to parse subject alternative names: {message}")]
    SubjectAltNames { message: String },
}

/// Failures describing the process-wide TLS context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TlsContextError {
    #[error("No process-wide TLS crypto provider is installed")]
    NoProvider,

    #[error("TLS context unavailable: {message}")]
    Unavailable { message: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;
