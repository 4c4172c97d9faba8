//! Fixed OID lookup tables
//!
//! Extension, signature and public key algorithm OIDs mapped to the names
//! reported for them. Adding a row never changes the lookup logic.

/// Certificate extension OIDs and their labels
pub const EXTENSION_LABELS: &[(&str, &str)] = &[
    ("2.5.29.9", "Subject Directory Attributes"),
    ("2.5.29.14", "Subject Key Identifier"),
    ("2.5.29.15", "Key Usage"),
    ("2.5.29.16", "Private Key Usage Period"),
    ("2.5.29.17", "Subject Alternative Name"),
    ("2.5.29.18", "Issuer Alternative Name"),
    ("2.5.29.19", "Basic Constraints"),
    ("2.5.29.30", "Name Constraints"),
    ("2.5.29.31", "CRL Distribution Points"),
    ("2.5.29.32", "Certificate Policies"),
    ("2.5.29.33", "Policy Mappings"),
    ("2.5.29.35", "Authority Key Identifier"),
    ("2.5.29.36", "Policy Constraints"),
    ("2.5.29.37", "Extended Key Usage"),
    ("2.5.29.46", "Freshest CRL"),
    ("2.5.29.54", "Inhibit anyPolicy"),
    ("1.3.6.1.5.5.7.1.1", "Authority Information Access"),
    ("1.3.6.1.5.5.7.1.11", "Subject Information Access"),
    ("1.3.6.1.5.5.7.1.24", "TLS Feature"),
    ("1.3.6.1.5.5.7.48.1.5", "OCSP No Check"),
    ("1.3.6.1.4.1.11129.2.4.2", "CT Precertificate SCTs"),
];

/// Signature algorithm OIDs, named the way JCA providers name them
const SIGNATURE_ALGORITHMS: &[(&str, &str)] = &[
    ("1.2.840.113549.1.1.4", "MD5withRSA"),
    ("1.2.840.113549.1.1.5", "SHA1withRSA"),
    ("1.2.840.113549.1.1.10", "RSASSA-PSS"),
    ("1.2.840.113549.1.1.11", "SHA256withRSA"),
    ("1.2.840.113549.1.1.12", "SHA384withRSA"),
    ("1.2.840.113549.1.1.13", "SHA512withRSA"),
    ("1.2.840.113549.1.1.14", "SHA224withRSA"),
    ("1.2.840.10045.4.1", "SHA1withECDSA"),
    ("1.2.840.10045.4.3.1", "SHA224withECDSA"),
    ("1.2.840.10045.4.3.2", "SHA256withECDSA"),
    ("1.2.840.10045.4.3.3", "SHA384withECDSA"),
    ("1.2.840.10045.4.3.4", "SHA512withECDSA"),
    ("1.2.840.10040.4.3", "SHA1withDSA"),
    ("2.16.840.1.101.3.4.3.2", "SHA256withDSA"),
    ("1.3.101.112", "Ed25519"),
    ("1.3.101.113", "Ed448"),
];

/// SubjectPublicKeyInfo algorithm OIDs
const PUBLIC_KEY_ALGORITHMS: &[(&str, &str)] = &[
    ("1.2.840.113549.1.1.1", "RSA"),
    ("1.2.840.113549.1.1.10", "RSASSA-PSS"),
    ("1.2.840.10045.2.1", "EC"),
    ("1.2.840.10040.4.1", "DSA"),
    ("1.2.840.10046.2.1", "DH"),
    ("1.3.101.110", "X25519"),
    ("1.3.101.111", "X448"),
    ("1.3.101.112", "Ed25519"),
    ("1.3.101.113", "Ed448"),
];

fn lookup(table: &'static [(&str, &str)], oid: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == oid)
        .map(|(_, label)| *label)
}

/// Label for an extension OID; unknown OIDs render as `"OID: <oid>"`
pub fn extension_label(oid: &str) -> String {
    match lookup(EXTENSION_LABELS, oid) {
        Some(label) => label.to_string(),
        None => format!("OID: {}", oid),
    }
}

/// Signature algorithm name; unknown OIDs are returned as-is
pub fn signature_algorithm_name(oid: &str) -> String {
    lookup(SIGNATURE_ALGORITHMS, oid)
        .map(str::to_string)
        .unwrap_or_else(|| oid.to_string())
}

/// Public key algorithm name; unknown OIDs are returned as-is
pub fn public_key_algorithm_name(oid: &str) -> String {
    lookup(PUBLIC_KEY_ALGORITHMS, oid)
        .map(str::to_string)
        .unwrap_or_else(|| oid.to_string())
}
