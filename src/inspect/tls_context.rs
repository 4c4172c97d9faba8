//! Process-wide TLS context facts
//!
//! The provider and default protocol reported next to the certificates are
//! not derived from the keystore; they come from whatever [`TlsContextSource`]
//! the caller injects.

use crate::utils::TlsContextError;
use rustls::crypto::CryptoProvider;
use rustls::ProtocolVersion;

/// Provider name and default protocol of the active TLS stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsContextInfo {
    pub provider: String,
    pub protocol: String,
}

/// Source of TLS context information
pub trait TlsContextSource: Send + Sync {
    fn describe(&self) -> Result<TlsContextInfo, TlsContextError>;
}

/// Describes the process-default rustls crypto provider
#[derive(Debug, Clone)]
pub struct RustlsContext {
    provider_name: String,
}

impl RustlsContext {
    pub fn new(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
        }
    }

    /// Install the ring provider as the process default and describe it. When
    /// a provider is already installed it is kept, and it is only labelled as
    /// ring if it offers ring's default cipher suites.
    pub fn install_ring() -> Self {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_ok()
        {
            return Self::new(RING_PROVIDER);
        }

        match CryptoProvider::get_default() {
            Some(installed) => Self::new(provider_label(installed)),
            None => Self::new(PREINSTALLED_PROVIDER),
        }
    }
}

const RING_PROVIDER: &str = "rustls (ring)";
const PREINSTALLED_PROVIDER: &str = "rustls (pre-installed provider)";

/// Name an installed provider, recognising ring by its cipher suites
fn provider_label(installed: &CryptoProvider) -> String {
    if suite_ids(installed) == suite_ids(&rustls::crypto::ring::default_provider()) {
        RING_PROVIDER.to_string()
    } else {
        tracing::warn!("A different rustls crypto provider is already installed; keeping it");
        PREINSTALLED_PROVIDER.to_string()
    }
}

fn suite_ids(provider: &CryptoProvider) -> Vec<rustls::CipherSuite> {
    provider.cipher_suites.iter().map(|s| s.suite()).collect()
}

impl TlsContextSource for RustlsContext {
    fn describe(&self) -> Result<TlsContextInfo, TlsContextError> {
        let provider = CryptoProvider::get_default().ok_or(TlsContextError::NoProvider)?;

        if provider.cipher_suites.is_empty() {
            return Err(TlsContextError::Unavailable {
                message: "provider offers no cipher suites".to_string(),
            });
        }

        let protocol = rustls::DEFAULT_VERSIONS
            .iter()
            .map(|v| protocol_label(v.version))
            .next()
            .ok_or_else(|| TlsContextError::Unavailable {
                message: "no default protocol versions".to_string(),
            })?;

        Ok(TlsContextInfo {
            provider: self.provider_name.clone(),
            protocol,
        })
    }
}

/// Conventional label for a protocol version, e.g. `TLSv1.3`
pub fn protocol_label(version: ProtocolVersion) -> String {
    match version {
        ProtocolVersion::TLSv1_3 => "TLSv1.3".to_string(),
        ProtocolVersion::TLSv1_2 => "TLSv1.2".to_string(),
        ProtocolVersion::TLSv1_1 => "TLSv1.1".to_string(),
        ProtocolVersion::TLSv1_0 => "TLSv1".to_string(),
        other => format!("{:?}", other),
    }
}
