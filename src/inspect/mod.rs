//! Keystore inspection
//!
//! Assembles per-alias certificate reports and attaches TLS context facts.

pub mod assembler;
pub mod tls_context;

pub use assembler::{inspect, InspectRequest, ReportAssembler};
pub use tls_context::{RustlsContext, TlsContextInfo, TlsContextSource};
