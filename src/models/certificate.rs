//! Decoded certificate types

use crate::utils::FieldError;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A sub-field that is extracted independently of the rest of the certificate.
///
/// Serializes as the bare value, or as `{"error": "..."}` when extraction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldResult<T> {
    Value(T),
    Error { error: String },
}

impl<T> FieldResult<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            FieldResult::Value(v) => Some(v),
            FieldResult::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FieldResult::Value(_) => None,
            FieldResult::Error { error } => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FieldResult::Error { .. })
    }
}

impl<T> From<Result<T, FieldError>> for FieldResult<T> {
    fn from(result: Result<T, FieldError>) -> Self {
        match result {
            Ok(v) => FieldResult::Value(v),
            Err(e) => FieldResult::Error {
                error: e.to_string(),
            },
        }
    }
}

/// One subject alternative name: the general-name type code, its label and
/// the rendered value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAltName {
    pub type_code: u32,
    pub label: String,
    pub value: String,
}

impl fmt::Display for SubjectAltName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

impl Serialize for SubjectAltName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Extension OID to label, e.g. `"2.5.29.19" -> "Basic Constraints"`
pub type ExtensionLabels = BTreeMap<String, String>;

/// Decoded view of one X.509 certificate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    /// Subject distinguished name (RFC 4514)
    pub subject: String,
    /// Issuer distinguished name (RFC 4514)
    pub issuer: String,
    /// Serial number as lowercase hex without leading zeros
    pub serial_number: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    /// X.509 version, 1-based
    pub version: u32,
    pub signature_algorithm: String,
    pub public_key_algorithm: String,
    pub public_key_format: String,
    pub critical_extensions: FieldResult<ExtensionLabels>,
    pub non_critical_extensions: FieldResult<ExtensionLabels>,
    pub subject_alternative_names: FieldResult<Vec<SubjectAltName>>,
    /// SHA-256 over the DER encoding, uppercase hex
    pub sha256_fingerprint: String,
    /// SHA-1 over the DER encoding, uppercase hex
    pub sha1_fingerprint: String,
}

impl CertificateData {
    /// Days until `valid_until` (negative once expired)
    pub fn days_until_expiry(&self) -> i64 {
        self.valid_until.signed_duration_since(Utc::now()).num_days()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.valid_until
    }

    pub fn is_not_yet_valid(&self) -> bool {
        Utc::now() < self.valid_from
    }

    /// SANs rendered as `"<label>: <value>"`, empty if extraction failed
    pub fn san_strings(&self) -> Vec<String> {
        self.subject_alternative_names
            .value()
            .map(|sans| sans.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }
}
