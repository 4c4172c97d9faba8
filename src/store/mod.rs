//! Keystore loading
//!
//! Opens PKCS#12 keystores and PEM bundles read-only and exposes their
//! entries by alias.

pub mod format;
pub mod loader;

pub use format::StoreFormat;
pub use loader::{open, CertificateStore, StoreEntry};
