//! Data models for keystore-inspect
//!
//! Serializable types produced by the decoder and the report assembler.

pub mod certificate;
pub mod report;

pub use certificate::{CertificateData, ExtensionLabels, FieldResult, SubjectAltName};
pub use report::{CertificateEntry, Report, PATH_NOT_CONFIGURED};
