//! JSON output formatter

use crate::models::Report;
use crate::utils::ToolkitError;
use std::path::Path;

/// Serialize a report, indented when `pretty` is set
pub fn to_json(report: &Report, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

/// Print a report as JSON to stdout
pub fn print_json(report: &Report, pretty: bool) -> anyhow::Result<()> {
    let json = to_json(report, pretty)?;
    println!("{}", json);
    Ok(())
}

/// Write a report as pretty JSON to `path`
pub fn write_json_file(report: &Report, path: &Path) -> Result<(), ToolkitError> {
    let json = to_json(report, true)?;
    std::fs::write(path, json + "\n")?;
    tracing::debug!("Wrote JSON report to {}", path.display());
    Ok(())
}
