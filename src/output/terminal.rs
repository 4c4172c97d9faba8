//! Rich terminal output formatting

use super::tables::{format_certificate_table, format_extensions};
use crate::models::{CertificateEntry, FieldResult, Report};
use console::style;
use std::fmt::Write;

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

/// Print a report as styled tables, one per alias
pub fn print_report(report: &Report) {
    print_header("Keystore");
    println!("  {} {}", style("Path:").bold(), report.key_store_path);

    if let Some(error) = &report.error {
        println!("  {} {}", style("✗").red(), style(error).red());
        return;
    }

    println!(
        "  {} {}",
        style("Certificates:").bold(),
        report.certificate_count()
    );
    match (&report.ssl_provider, &report.ssl_protocol) {
        (Some(provider), Some(protocol)) => {
            println!("  {} {} / {}", style("TLS:").bold(), provider, protocol)
        }
        _ => {
            if let Some(error) = &report.tls_context_error {
                println!("  {} {}", style("TLS:").bold(), style(error).yellow());
            }
        }
    }

    for (alias, entry) in &report.certificates {
        print_header(&format!("Alias: {}", alias));
        match entry {
            CertificateEntry::Decoded(cert) => print!("{}", format_certificate_table(cert)),
            CertificateEntry::Unreadable { error } => {
                println!("  {} {}", style("✗").red(), style(error).red())
            }
        }
    }
    println!();
}

/// Render a report as plain `key: value` lines
pub fn format_plain(report: &Report) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_plain(&mut out, report);
    out
}

fn write_plain(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, "keyStorePath: {}", report.key_store_path)?;
    if let Some(error) = &report.error {
        writeln!(out, "error: {}", error)?;
    }
    if let Some(provider) = &report.ssl_provider {
        writeln!(out, "sslProvider: {}", provider)?;
    }
    if let Some(protocol) = &report.ssl_protocol {
        writeln!(out, "sslProtocol: {}", protocol)?;
    }
    if let Some(error) = &report.tls_context_error {
        writeln!(out, "tlsContextError: {}", error)?;
    }

    for (alias, entry) in &report.certificates {
        writeln!(out)?;
        writeln!(out, "[{}]", alias)?;
        let cert = match entry {
            CertificateEntry::Decoded(cert) => cert,
            CertificateEntry::Unreadable { error } => {
                writeln!(out, "error: {}", error)?;
                continue;
            }
        };

        writeln!(out, "subject: {}", cert.subject)?;
        writeln!(out, "issuer: {}", cert.issuer)?;
        writeln!(out, "serialNumber: {}", cert.serial_number)?;
        writeln!(out, "validFrom: {}", cert.valid_from.to_rfc3339())?;
        writeln!(out, "validUntil: {}", cert.valid_until.to_rfc3339())?;
        writeln!(out, "version: {}", cert.version)?;
        writeln!(out, "signatureAlgorithm: {}", cert.signature_algorithm)?;
        writeln!(out, "publicKeyAlgorithm: {}", cert.public_key_algorithm)?;
        writeln!(out, "publicKeyFormat: {}", cert.public_key_format)?;
        for (key, field) in [
            ("criticalExtensions", &cert.critical_extensions),
            ("nonCriticalExtensions", &cert.non_critical_extensions),
        ] {
            match field {
                FieldResult::Value(labels) => {
                    writeln!(out, "{}: {}", key, format_extensions(labels).replace('\n', ", "))?
                }
                FieldResult::Error { error } => writeln!(out, "{}: error: {}", key, error)?,
            }
        }
        match &cert.subject_alternative_names {
            FieldResult::Value(_) => writeln!(
                out,
                "subjectAlternativeNames: {}",
                cert.san_strings().join(", ")
            )?,
            FieldResult::Error { error } => {
                writeln!(out, "subjectAlternativeNames: error: {}", error)?
            }
        }
        writeln!(out, "sha256Fingerprint: {}", cert.sha256_fingerprint)?;
        writeln!(out, "sha1Fingerprint: {}", cert.sha1_fingerprint)?;
    }
    Ok(())
}

/// Print a report as plain text
pub fn print_plain(report: &Report) {
    print!("{}", format_plain(report));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_failed_report() {
        let report = Report::failed("missing.p12", "Keystore file not found: missing.p12");
        assert_eq!(
            format_plain(&report),
            "keyStorePath: missing.p12\nerror: Keystore file not found: missing.p12\n"
        );
    }

    #[test]
    fn test_plain_unreadable_entry() {
        let mut report = Report::new("store.pem");
        report.certificates.insert(
            "cert-0".to_string(),
            CertificateEntry::Unreadable {
                error: "bad DER".to_string(),
            },
        );
        let text = format_plain(&report);
        assert!(text.contains("[cert-0]\nerror: bad DER\n"));
    }
}
