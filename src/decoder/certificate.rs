//! X.509 certificate decoding
//!
//! Turns the DER bytes of one keystore entry into a [`CertificateData`] using
//! x509-parser. Extension and SAN extraction fail independently of the rest
//! of the certificate.

use super::fingerprint::{sha1_hex, sha256_hex};
use super::names::{distinguished_name, subject_alt_name};
use super::oids::{extension_label, public_key_algorithm_name, signature_algorithm_name};
use crate::models::{CertificateData, ExtensionLabels, FieldResult, SubjectAltName};
use crate::utils::{CertificateError, FieldError};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use x509_parser::oid_registry::OID_X509_EXT_SUBJECT_ALT_NAME;
use x509_parser::prelude::*;

/// Encoding of every SubjectPublicKeyInfo embedded in an X.509 certificate
const PUBLIC_KEY_FORMAT: &str = "X.509";

/// Certificate decoder
pub struct CertificateDecoder;

impl CertificateDecoder {
    /// Create a new certificate decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a single DER-encoded certificate stored under `alias`.
    ///
    /// Fails only when the bytes are not a structurally valid certificate.
    pub fn decode(&self, alias: &str, der: &[u8]) -> Result<CertificateData, CertificateError> {
        let (rest, cert) =
            X509Certificate::from_der(der).map_err(|e| CertificateError::ParseError {
                alias: alias.to_string(),
                message: format!("{:?}", e),
            })?;

        // Fingerprints cover exactly the certificate's encoding, not trailing bytes
        let encoded = &der[..der.len() - rest.len()];
        if !rest.is_empty() {
            tracing::warn!(
                "Ignoring {} trailing bytes after certificate for alias {}",
                rest.len(),
                alias
            );
        }

        let valid_from = asn1_time_to_datetime(alias, cert.validity().not_before)?;
        let valid_until = asn1_time_to_datetime(alias, cert.validity().not_after)?;

        let (critical_extensions, non_critical_extensions) = match extension_labels(&cert) {
            Ok((critical, non_critical)) => {
                (FieldResult::Value(critical), FieldResult::Value(non_critical))
            }
            Err(e) => {
                tracing::warn!("Extensions of alias {}: {}", alias, e);
                let failed = || FieldResult::Error {
                    error: e.to_string(),
                };
                (failed(), failed())
            }
        };

        let sans = subject_alt_names(&cert);
        if let Err(e) = &sans {
            tracing::warn!("Subject alternative names of alias {}: {}", alias, e);
        }

        Ok(CertificateData {
            subject: distinguished_name(cert.subject()),
            issuer: distinguished_name(cert.issuer()),
            serial_number: cert.serial.to_str_radix(16),
            valid_from,
            valid_until,
            version: cert.version().0 + 1, // X.509 version is 0-indexed
            signature_algorithm: signature_algorithm_name(
                &cert.signature_algorithm.algorithm.to_id_string(),
            ),
            public_key_algorithm: public_key_algorithm_name(
                &cert.public_key().algorithm.algorithm.to_id_string(),
            ),
            public_key_format: PUBLIC_KEY_FORMAT.to_string(),
            critical_extensions,
            non_critical_extensions,
            subject_alternative_names: sans.into(),
            sha256_fingerprint: sha256_hex(encoded),
            sha1_fingerprint: sha1_hex(encoded),
        })
    }
}

impl Default for CertificateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Partition extension OIDs by the certificate's own critical flag
fn extension_labels(
    cert: &X509Certificate,
) -> Result<(ExtensionLabels, ExtensionLabels), FieldError> {
    partition_extensions(
        cert.extensions()
            .iter()
            .map(|ext| (ext.oid.to_id_string(), ext.critical)),
    )
}

/// Label `(oid, critical)` pairs into critical and non-critical maps. An OID
/// seen twice fails the whole partition.
fn partition_extensions<I>(
    extensions: I,
) -> Result<(ExtensionLabels, ExtensionLabels), FieldError>
where
    I: IntoIterator<Item = (String, bool)>,
{
    let mut critical = ExtensionLabels::new();
    let mut non_critical = ExtensionLabels::new();
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for (oid, is_critical) in extensions {
        if !seen.insert(oid.clone()) {
            duplicates.push(oid.clone());
        }

        let label = extension_label(&oid);
        if is_critical {
            critical.insert(oid, label);
        } else {
            non_critical.insert(oid, label);
        }
    }

    if !duplicates.is_empty() {
        return Err(FieldError::Extensions {
            message: format!("duplicate extension(s): {}", duplicates.join(", ")),
        });
    }

    Ok((critical, non_critical))
}

/// Collect the subject alternative names in certificate order
fn subject_alt_names(cert: &X509Certificate) -> Result<Vec<SubjectAltName>, FieldError> {
    let mut san_exts = cert
        .extensions()
        .iter()
        .filter(|ext| ext.oid == OID_X509_EXT_SUBJECT_ALT_NAME);

    let Some(ext) = san_exts.next() else {
        return Ok(Vec::new());
    };
    if san_exts.next().is_some() {
        return Err(FieldError::SubjectAltNames {
            message: "extension appears more than once".to_string(),
        });
    }

    match ext.parsed_extension() {
        ParsedExtension::SubjectAlternativeName(san) => {
            Ok(san.general_names.iter().map(subject_alt_name).collect())
        }
        _ => Err(FieldError::SubjectAltNames {
            message: format!(
                "malformed extension value ({} bytes)",
                ext.value.len()
            ),
        }),
    }
}

/// Convert ASN.1 time to chrono DateTime
fn asn1_time_to_datetime(alias: &str, time: ASN1Time) -> Result<DateTime<Utc>, CertificateError> {
    Utc.timestamp_opt(time.timestamp(), 0)
        .single()
        .ok_or_else(|| CertificateError::ParseError {
            alias: alias.to_string(),
            message: "Invalid timestamp in certificate validity".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixture_der(name: &str) -> Vec<u8> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name);
        let data = std::fs::read(&path).expect("fixture should exist");
        ::pem::parse(data).expect("fixture is PEM").into_contents()
    }

    #[test]
    fn test_decode_server_certificate() {
        let der = fixture_der("server-cert.pem");
        let cert = CertificateDecoder::new().decode("server", &der).unwrap();

        assert_eq!(cert.subject, "CN=server.example.com,O=Example Org,C=US");
        assert_eq!(cert.issuer, cert.subject);
        assert_eq!(cert.serial_number, "1a2b3c4d5e6f");
        assert_eq!(cert.version, 3);
        assert_eq!(cert.signature_algorithm, "SHA256withRSA");
        assert_eq!(cert.public_key_algorithm, "RSA");
        assert_eq!(cert.public_key_format, "X.509");
        assert_eq!(
            cert.valid_from,
            Utc.with_ymd_and_hms(2026, 10, 19, 7, 43, 19).unwrap()
        );
        assert_eq!(
            cert.valid_until,
            Utc.with_ymd_and_hms(2126, 9, 25, 7, 43, 19).unwrap()
        );
    }

    #[test]
    fn test_extensions_partitioned_by_criticality() {
        let der = fixture_der("server-cert.pem");
        let cert = CertificateDecoder::new().decode("server", &der).unwrap();

        let critical = cert.critical_extensions.value().unwrap();
        assert_eq!(critical.len(), 2);
        assert_eq!(critical["2.5.29.19"], "Basic Constraints");
        assert_eq!(critical["2.5.29.15"], "Key Usage");

        let non_critical = cert.non_critical_extensions.value().unwrap();
        assert_eq!(non_critical["2.5.29.17"], "Subject Alternative Name");
        assert_eq!(non_critical["2.5.29.37"], "Extended Key Usage");
        assert_eq!(non_critical["2.5.29.14"], "Subject Key Identifier");
        assert!(!non_critical.contains_key("2.5.29.19"));
    }

    #[test]
    fn test_dns_subject_alt_names_in_order() {
        let der = fixture_der("server-cert.pem");
        let cert = CertificateDecoder::new().decode("server", &der).unwrap();

        assert_eq!(
            cert.san_strings(),
            vec!["dNSName: example.com", "dNSName: www.example.com"]
        );
    }

    #[test]
    fn test_mixed_subject_alt_names_and_unknown_extension() {
        let der = fixture_der("ca-cert.pem");
        let cert = CertificateDecoder::new().decode("ca", &der).unwrap();

        assert_eq!(cert.subject, "CN=Example Root CA,O=Example Org");
        assert_eq!(cert.serial_number, "1000");
        assert_eq!(cert.signature_algorithm, "SHA256withECDSA");
        assert_eq!(cert.public_key_algorithm, "EC");
        assert_eq!(
            cert.san_strings(),
            vec![
                "rfc822Name: pki@example.com",
                "uniformResourceIdentifier: https://pki.example.com/",
                "iPAddress: 192.0.2.10",
                "iPAddress: 2001:db8::1",
            ]
        );
        assert_eq!(
            cert.non_critical_extensions.value().unwrap()["1.2.3.4.5.6"],
            "OID: 1.2.3.4.5.6"
        );
    }

    #[test]
    fn test_fingerprints_match_openssl() {
        let der = fixture_der("server-cert.pem");
        let cert = CertificateDecoder::new().decode("server", &der).unwrap();

        assert_eq!(
            cert.sha256_fingerprint,
            "CD4C2411706924B5BEDBD14911308E0B901D3CFE4A474F5B7AC4429AF9B425DE"
        );
        assert_eq!(
            cert.sha1_fingerprint,
            "41099D95A60C02915345FF0EC50D8DA1DF28D5EC"
        );
    }

    #[test]
    fn test_fingerprints_ignore_trailing_bytes() {
        let der = fixture_der("ca-cert.pem");
        let mut padded = der.clone();
        padded.extend_from_slice(&[0, 0, 0]);

        let decoder = CertificateDecoder::new();
        let plain = decoder.decode("ca", &der).unwrap();
        let with_trailer = decoder.decode("ca", &padded).unwrap();
        assert_eq!(plain.sha256_fingerprint, with_trailer.sha256_fingerprint);
        assert_eq!(
            plain.sha256_fingerprint,
            "8B89734D03AC6E7157DF7C64AEE3545EF3BC040C2F69ABF293DE756E908E83A8"
        );
    }

    #[test]
    fn test_malformed_san_is_scoped_to_its_field() {
        let mut der = fixture_der("server-cert.pem");
        // OID 2.5.29.17 followed by the OCTET STRING wrapping the SAN SEQUENCE
        let marker = [0x06, 0x03, 0x55, 0x1d, 0x11, 0x04];
        let at = der
            .windows(marker.len())
            .position(|w| w == marker)
            .expect("SAN extension present");
        let seq = at + marker.len() + 1;
        assert_eq!(der[seq], 0x30);
        der[seq] = 0x04;

        let cert = CertificateDecoder::new().decode("server", &der).unwrap();

        assert!(cert.subject_alternative_names.is_error());
        assert!(cert
            .subject_alternative_names
            .error()
            .unwrap()
            .contains("subject alternative names"));
        assert!(cert.san_strings().is_empty());
        assert_eq!(cert.subject, "CN=server.example.com,O=Example Org,C=US");
        assert_eq!(
            cert.critical_extensions.value().unwrap()["2.5.29.19"],
            "Basic Constraints"
        );
        assert!(cert
            .non_critical_extensions
            .value()
            .unwrap()
            .contains_key("2.5.29.17"));
        assert_eq!(cert.sha256_fingerprint.len(), 64);
        assert_eq!(cert.sha1_fingerprint.len(), 40);
    }

    #[test]
    fn test_duplicate_extension_fails_partition() {
        let err = partition_extensions(vec![
            ("2.5.29.19".to_string(), true),
            ("2.5.29.15".to_string(), true),
            ("2.5.29.19".to_string(), false),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            FieldError::Extensions {
                message: "duplicate extension(s): 2.5.29.19".to_string()
            }
        );
    }

    #[test]
    fn test_partition_labels_unknown_oids() {
        let (critical, non_critical) = partition_extensions(vec![
            ("2.5.29.15".to_string(), true),
            ("1.2.3.4.5.6".to_string(), false),
        ])
        .unwrap();

        assert_eq!(critical["2.5.29.15"], "Key Usage");
        assert_eq!(non_critical["1.2.3.4.5.6"], "OID: 1.2.3.4.5.6");
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = CertificateDecoder::new()
            .decode("junk", &[0x30, 0x03, 0x02, 0x01, 0x01])
            .unwrap_err();
        assert!(err.to_string().contains("junk"));
    }
}
