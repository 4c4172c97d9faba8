//! Report assembly
//!
//! Opens the keystore, decodes every X.509 entry and folds the results, along
//! with any load failure, into a single [`Report`]. Nothing here returns an
//! error: every failure ends up inside the report.

use super::tls_context::TlsContextSource;
use crate::decoder::CertificateDecoder;
use crate::models::{CertificateEntry, Report, PATH_NOT_CONFIGURED};
use crate::store::{self, CertificateStore};
use crate::utils::LoadError;
use std::path::PathBuf;

/// What to inspect: supplied by the caller, never read from the environment
#[derive(Debug, Clone, Default)]
pub struct InspectRequest {
    pub path: Option<PathBuf>,
    pub password: String,
    pub store_type: Option<String>,
}

impl InspectRequest {
    pub fn new(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            password: password.into(),
            store_type: None,
        }
    }

    pub fn with_store_type(mut self, store_type: impl Into<String>) -> Self {
        self.store_type = Some(store_type.into());
        self
    }

    /// The path as it appears in the report
    pub fn display_path(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| PATH_NOT_CONFIGURED.to_string())
    }
}

/// Drives the loader and decoder and builds reports
pub struct ReportAssembler {
    decoder: CertificateDecoder,
    tls_context: Option<Box<dyn TlsContextSource>>,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self {
            decoder: CertificateDecoder::new(),
            tls_context: None,
        }
    }

    /// Report TLS context facts from `source` alongside the certificates
    pub fn with_tls_context(mut self, source: impl TlsContextSource + 'static) -> Self {
        self.tls_context = Some(Box::new(source));
        self
    }

    /// Open the requested keystore and build its report
    pub fn inspect(&self, request: &InspectRequest) -> Report {
        let configured_path = request.display_path();

        let Some(path) = request.path.as_deref() else {
            tracing::warn!("No keystore path configured");
            return Report::failed(
                configured_path,
                LoadError::NotFound {
                    path: PATH_NOT_CONFIGURED.to_string(),
                },
            );
        };

        match store::open(path, &request.password, request.store_type.as_deref()) {
            Ok(store) => self.build_report(configured_path, &store),
            Err(e) => {
                tracing::warn!("{}", e);
                Report::failed(configured_path, e)
            }
        }
    }

    /// Build a report from an already opened store
    pub fn build_report(
        &self,
        configured_path: impl Into<String>,
        store: &CertificateStore,
    ) -> Report {
        let mut report = Report::new(configured_path);

        for (alias, entry) in store.entries() {
            let Some(der) = entry.x509_der() else {
                tracing::debug!("Skipping non-X.509 entry {}", alias);
                continue;
            };

            let result = match self.decoder.decode(alias, der) {
                Ok(data) => CertificateEntry::Decoded(Box::new(data)),
                Err(e) => {
                    tracing::warn!("{}", e);
                    CertificateEntry::Unreadable {
                        error: e.to_string(),
                    }
                }
            };

            // A repeated alias replaces the earlier result
            report.certificates.insert(alias.to_string(), result);
        }

        self.attach_tls_context(&mut report);
        report
    }

    fn attach_tls_context(&self, report: &mut Report) {
        let Some(source) = &self.tls_context else {
            return;
        };

        match source.describe() {
            Ok(info) => {
                report.ssl_provider = Some(info.provider);
                report.ssl_protocol = Some(info.protocol);
            }
            Err(e) => {
                tracing::warn!("TLS context lookup failed: {}", e);
                report.tls_context_error = Some(e.to_string());
            }
        }
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Inspect a keystore without TLS context information
pub fn inspect(request: &InspectRequest) -> Report {
    ReportAssembler::new().inspect(request)
}
