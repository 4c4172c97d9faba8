//! keystore-inspect - report the certificates held in a keystore
//!
//! Loads a PKCS#12 or PEM store, decodes every certificate and prints the
//! result as tables, plain text or JSON.

use clap::Parser;
use console::style;
use keystore_inspect::cli::Cli;
use keystore_inspect::config;
use keystore_inspect::inspect::{ReportAssembler, RustlsContext};
use keystore_inspect::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when the keystore could not be opened
const EXIT_REPORT_ERROR: u8 = 2;

fn main() -> ExitCode {
    // Usage errors exit 1; status 2 is reserved for reports carrying an error
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Handle color preference
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let settings = config::load_settings(cli.config.as_deref())?;
    let request = cli.inspect_request(&settings);

    let report = ReportAssembler::new()
        .with_tls_context(RustlsContext::install_ring())
        .inspect(&request);

    output::render(&report, cli.output_format(&settings), settings.output.pretty)?;

    if let Some(path) = &cli.output {
        output::write_json_file(&report, path)?;
        eprintln!(
            "{} Report written to {}",
            style("✓").green(),
            path.display()
        );
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_REPORT_ERROR))
    }
}
