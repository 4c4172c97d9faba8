//! Keystore inspection report

use super::certificate::CertificateData;
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder reported as the keystore path when none was configured
pub const PATH_NOT_CONFIGURED: &str = "Not configured";

/// Result for one alias: the decoded certificate, or why its bytes could not
/// be decoded at all
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CertificateEntry {
    Decoded(Box<CertificateData>),
    Unreadable { error: String },
}

impl CertificateEntry {
    pub fn certificate(&self) -> Option<&CertificateData> {
        match self {
            CertificateEntry::Decoded(data) => Some(data),
            CertificateEntry::Unreadable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CertificateEntry::Decoded(_) => None,
            CertificateEntry::Unreadable { error } => Some(error),
        }
    }
}

/// Everything learned from one keystore
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The keystore path as configured by the caller
    pub key_store_path: String,
    /// Decoded certificates keyed by alias
    pub certificates: BTreeMap<String, CertificateEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_protocol: Option<String>,
    /// The TLS context lookup failed; certificate data is unaffected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_context_error: Option<String>,
    /// The keystore could not be opened; `certificates` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn new(key_store_path: impl Into<String>) -> Self {
        Self {
            key_store_path: key_store_path.into(),
            certificates: BTreeMap::new(),
            ssl_provider: None,
            ssl_protocol: None,
            tls_context_error: None,
            error: None,
        }
    }

    /// A report for a keystore that could not be opened
    pub fn failed(key_store_path: impl Into<String>, error: impl ToString) -> Self {
        let mut report = Self::new(key_store_path);
        report.error = Some(error.to_string());
        report
    }

    pub fn certificate(&self, alias: &str) -> Option<&CertificateData> {
        self.certificates.get(alias).and_then(|e| e.certificate())
    }

    pub fn certificate_count(&self) -> usize {
        self.certificates.len()
    }

    /// True when the keystore itself was opened
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
