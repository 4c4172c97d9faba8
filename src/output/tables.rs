//! Table rendering using comfy-table

use crate::models::{CertificateData, ExtensionLabels, FieldResult};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, ContentArrangement, Table};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Build the two-column field/value table for one certificate
pub fn certificate_table(cert: &CertificateData) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    // Constrain table width to terminal width minus indent, default to 120 if detection fails
    let width = console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols)
        .unwrap_or(120)
        .saturating_sub(4);
    table.set_width(width);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Field").add_attribute(Attribute::Bold).fg(Color::Cyan),
        Cell::new("Value").add_attribute(Attribute::Bold).fg(Color::Cyan),
    ]);

    let text_rows = [
        ("Subject", cert.subject.clone()),
        ("Issuer", cert.issuer.clone()),
        ("Serial Number", cert.serial_number.clone()),
        ("Version", format!("v{}", cert.version)),
        ("Valid From", cert.valid_from.format(TIMESTAMP_FORMAT).to_string()),
    ];
    for (field, value) in text_rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }

    table.add_row(vec![Cell::new("Valid Until"), validity_cell(cert)]);

    table.add_row(vec![
        Cell::new("Signature Algorithm"),
        Cell::new(&cert.signature_algorithm),
    ]);
    table.add_row(vec![
        Cell::new("Public Key"),
        Cell::new(format!(
            "{} ({})",
            cert.public_key_algorithm, cert.public_key_format
        )),
    ]);
    table.add_row(vec![
        Cell::new("Critical Extensions"),
        field_cell(&cert.critical_extensions, format_extensions),
    ]);
    table.add_row(vec![
        Cell::new("Non-critical Extensions"),
        field_cell(&cert.non_critical_extensions, format_extensions),
    ]);
    table.add_row(vec![
        Cell::new("Subject Alternative Names"),
        field_cell(&cert.subject_alternative_names, |sans| {
            sans.iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        }),
    ]);
    table.add_row(vec![
        Cell::new("SHA-256 Fingerprint"),
        Cell::new(format_fingerprint(&cert.sha256_fingerprint)),
    ]);
    table.add_row(vec![
        Cell::new("SHA-1 Fingerprint"),
        Cell::new(format_fingerprint(&cert.sha1_fingerprint)),
    ]);

    table
}

/// Format a certificate table to an indented string
pub fn format_certificate_table(cert: &CertificateData) -> String {
    let mut out = String::new();
    for line in certificate_table(cert).to_string().lines() {
        out.push_str(&format!("    {}\n", line));
    }
    out
}

fn validity_cell(cert: &CertificateData) -> Cell {
    let text = format!(
        "{} ({})",
        cert.valid_until.format(TIMESTAMP_FORMAT),
        validity_note(cert)
    );

    let color = if cert.is_expired() {
        Color::Red
    } else if cert.is_not_yet_valid() || cert.days_until_expiry() <= 30 {
        Color::Yellow
    } else {
        Color::Green
    };
    Cell::new(text).fg(color)
}

/// Lifetime note shown next to the expiry date
pub fn validity_note(cert: &CertificateData) -> String {
    let days = cert.days_until_expiry();
    if cert.is_expired() {
        format!("expired {} days ago", -days)
    } else if cert.is_not_yet_valid() {
        format!(
            "not valid before {}",
            cert.valid_from.format(TIMESTAMP_FORMAT)
        )
    } else {
        format!("{} days left", days)
    }
}

fn field_cell<T>(field: &FieldResult<T>, render: impl Fn(&T) -> String) -> Cell {
    match field {
        FieldResult::Value(value) => {
            let text = render(value);
            if text.is_empty() {
                Cell::new("(none)").add_attribute(Attribute::Dim)
            } else {
                Cell::new(text)
            }
        }
        FieldResult::Error { error } => Cell::new(format!("✗ {}", error)).fg(Color::Red),
    }
}

/// One `Label (oid)` line per extension
pub fn format_extensions(labels: &ExtensionLabels) -> String {
    labels
        .iter()
        .map(|(oid, label)| {
            if label.ends_with(oid.as_str()) {
                label.clone()
            } else {
                format!("{} ({})", label, oid)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Colon-separate hex digits in pairs
pub fn format_fingerprint(hex: &str) -> String {
    hex.as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect::<Vec<_>>()
        .join(":")
}
