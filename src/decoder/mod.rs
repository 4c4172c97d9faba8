//! Certificate decoding
//!
//! Extracts identity, key, extension, SAN and fingerprint information from
//! DER-encoded X.509 certificates.

pub mod certificate;
pub mod fingerprint;
pub mod names;
pub mod oids;

pub use certificate::CertificateDecoder;
pub use names::general_name_type_label;
pub use oids::extension_label;
