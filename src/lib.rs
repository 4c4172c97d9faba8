//! keystore-inspect library
//!
//! Opens a PKCS#12 or PEM certificate store and reports, per alias:
//! - Subject, issuer, serial number, validity window and version
//! - Signature and public key algorithms
//! - Critical and non-critical extensions with human-readable labels
//! - Subject alternative names
//! - SHA-256 and SHA-1 fingerprints of the DER encoding
//!
//! Every failure is captured in the report instead of being raised.
//!
//! # Usage
//!
//! ```rust,ignore
//! use keystore_inspect::inspect::{InspectRequest, ReportAssembler, RustlsContext};
//!
//! let report = ReportAssembler::new()
//!     .with_tls_context(RustlsContext::install_ring())
//!     .inspect(&InspectRequest::new("server.p12", "changeit"));
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod decoder;
pub mod inspect;
pub mod models;
pub mod output;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use inspect::{inspect, InspectRequest, ReportAssembler};
pub use models::{CertificateData, Report};
pub use utils::{Result, ToolkitError};
