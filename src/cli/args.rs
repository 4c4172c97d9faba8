//! CLI argument definitions using clap

use crate::config::Settings;
use crate::inspect::InspectRequest;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "keystore-inspect")]
#[command(version)]
#[command(about = "Report the certificates held in a PKCS#12 or PEM keystore", long_about = None)]
pub struct Cli {
    /// Keystore file to inspect
    #[arg(value_name = "KEYSTORE", env = "KEYSTORE_PATH")]
    pub keystore: Option<PathBuf>,

    /// Keystore password
    #[arg(short, long, env = "KEYSTORE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Keystore type (pkcs12, p12, pfx or pem)
    #[arg(short = 't', long, value_name = "TYPE")]
    pub store_type: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the JSON report to file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Settings file (default: config/default.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Merge command-line values over `settings`
    pub fn inspect_request(&self, settings: &Settings) -> InspectRequest {
        InspectRequest {
            path: self
                .keystore
                .clone()
                .or_else(|| settings.keystore.path.clone()),
            password: self
                .password
                .clone()
                .unwrap_or_else(|| settings.keystore.password.clone()),
            store_type: self
                .store_type
                .clone()
                .or_else(|| settings.keystore.store_type.clone()),
        }
    }

    pub fn output_format(&self, settings: &Settings) -> OutputFormat {
        self.format.unwrap_or(settings.output.format)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rich terminal tables (default)
    #[default]
    Table,
    /// JSON output
    Json,
    /// Plain text (minimal formatting)
    Plain,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Plain => write!(f, "plain"),
        }
    }
}
