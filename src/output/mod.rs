//! Output formatting module
//!
//! Renders inspection reports as JSON, terminal tables or plain text.

pub mod json;
pub mod tables;
pub mod terminal;

use crate::cli::OutputFormat;
use crate::models::Report;

pub use json::{print_json, to_json, write_json_file};
pub use terminal::{format_plain, print_header, print_plain, print_report};

/// Print `report` to stdout in the requested format
pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(report, pretty)?,
        OutputFormat::Table => print_report(report),
        OutputFormat::Plain => print_plain(report),
    }
    Ok(())
}
