//! Keystore loading
//!
//! Reads a keystore file fully into memory, then parses it under the requested
//! format into an alias-keyed, read-only [`CertificateStore`].

use super::format::StoreFormat;
use crate::utils::LoadError;
use std::collections::BTreeMap;
use std::path::Path;

/// One entry of a keystore
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEntry {
    /// An entry backed by a DER-encoded X.509 certificate. For private key
    /// entries this is the entity certificate, the first of its chain.
    X509 { der: Vec<u8> },
    /// An entry that carries no X.509 certificate
    NonX509 { kind: String },
}

impl StoreEntry {
    /// The DER bytes of the entry's certificate, if it is an X.509 entry
    pub fn x509_der(&self) -> Option<&[u8]> {
        match self {
            StoreEntry::X509 { der } => Some(der),
            StoreEntry::NonX509 { .. } => None,
        }
    }
}

/// A read-only, fully parsed keystore
#[derive(Debug, Clone)]
pub struct CertificateStore {
    format: StoreFormat,
    entries: Vec<(String, StoreEntry)>,
}

impl CertificateStore {
    /// Open and parse the keystore at `path`.
    pub fn open(path: &Path, password: &str, format: StoreFormat) -> Result<Self, LoadError> {
        tracing::debug!("Opening {} keystore {}", format, path.display());

        let data = read_store_bytes(path)?;

        let entries = match format {
            StoreFormat::Pkcs12 => load_pkcs12(&data, path, password)?,
            StoreFormat::Pem => load_pem(&data, path)?,
        };

        tracing::debug!(
            "Loaded {} entries from {}",
            entries.len(),
            path.display()
        );

        Ok(Self {
            format,
            entries,
        })
    }

    /// Build a store from entries already in memory
    pub fn from_entries<I>(format: StoreFormat, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, StoreEntry)>,
    {
        Self {
            format,
            entries: entries.into_iter().collect(),
        }
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }

    /// Aliases in store order. The order carries no meaning.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(alias, _)| alias.as_str())
    }

    /// Look up an entry by alias. If the store yielded the alias more than
    /// once, the last occurrence wins.
    pub fn entry(&self, alias: &str) -> Option<&StoreEntry> {
        self.entries
            .iter()
            .rev()
            .find(|(a, _)| a == alias)
            .map(|(_, entry)| entry)
    }

    /// Iterate `(alias, entry)` pairs in store order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StoreEntry)> {
        self.entries
            .iter()
            .map(|(alias, entry)| (alias.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Open a keystore, resolving an optional format identifier first.
///
/// The identifier is validated before the file is touched, so an unsupported
/// format is reported even when the path does not exist.
pub fn open(
    path: &Path,
    password: &str,
    format: Option<&str>,
) -> Result<CertificateStore, LoadError> {
    let format = StoreFormat::resolve(format)?;
    CertificateStore::open(path, password, format)
}

fn read_store_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.display().to_string(),
        },
        _ => LoadError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        },
    })
}

/// Parse a PKCS#12 container into alias-keyed entries
fn load_pkcs12(
    data: &[u8],
    path: &Path,
    password: &str,
) -> Result<Vec<(String, StoreEntry)>, LoadError> {
    if !is_likely_pkcs12(data) {
        let hint = if std::str::from_utf8(data).is_ok_and(|t| t.contains("-----BEGIN ")) {
            "file contains PEM text, not a PKCS#12 container (try the PEM store type)"
        } else {
            "not a DER-encoded PKCS#12 container"
        };
        return Err(LoadError::MalformedStore {
            path: path.display().to_string(),
            message: hint.to_string(),
        });
    }

    let keystore = p12_keystore::KeyStore::from_pkcs12(data, password)
        .map_err(|e| classify_pkcs12_error(path, &e))?;

    Ok(keystore
        .entries()
        .map(|(alias, entry)| (alias.to_string(), pkcs12_entry(entry)))
        .collect())
}

fn pkcs12_entry(entry: &p12_keystore::KeyStoreEntry) -> StoreEntry {
    match entry {
        p12_keystore::KeyStoreEntry::PrivateKeyChain(chain) => match chain.chain().first() {
            Some(cert) => StoreEntry::X509 {
                der: cert.as_der().to_vec(),
            },
            None => StoreEntry::NonX509 {
                kind: "private key".to_string(),
            },
        },
        p12_keystore::KeyStoreEntry::Certificate(cert) => StoreEntry::X509 {
            der: cert.as_der().to_vec(),
        },
        #[allow(unreachable_patterns)]
        _ => StoreEntry::NonX509 {
            kind: "secret key".to_string(),
        },
    }
}

/// Phrases `p12-keystore` uses when the MAC or a decryption step fails, which
/// is how a wrong password shows up.
const AUTHENTICATION_HINTS: &[&str] = &["password", "mac", "integrity", "decrypt", "padding"];

fn classify_pkcs12_error(path: &Path, err: &p12_keystore::error::Error) -> LoadError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if AUTHENTICATION_HINTS.iter().any(|hint| lowered.contains(hint)) {
        LoadError::AuthenticationFailure {
            path: path.display().to_string(),
            message,
        }
    } else if lowered.contains("unsupported") {
        LoadError::UnsupportedFormat {
            format: format!("{} ({})", StoreFormat::Pkcs12, message),
        }
    } else {
        LoadError::MalformedStore {
            path: path.display().to_string(),
            message,
        }
    }
}

/// Heuristic to recognise a PKCS#12 container: an ASN.1 SEQUENCE whose
/// first bytes carry the pkcs7-data OID of the authSafe.
fn is_likely_pkcs12(data: &[u8]) -> bool {
    // 06 09 2a 86 48 86 f7 0d 01 07 01 = OID 1.2.840.113549.1.7.1
    const PKCS7_DATA_OID: [u8; 11] = [
        0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x01,
    ];

    if data.len() <= 4 || data[0] != 0x30 {
        return false;
    }
    let search_len = data.len().min(50);
    data[..search_len]
        .windows(PKCS7_DATA_OID.len())
        .any(|w| w == PKCS7_DATA_OID)
}

/// Parse a PEM bundle. `CERTIFICATE` blocks become X.509 entries aliased
/// `cert-<n>`; every other block is kept as a non-X.509 entry.
fn load_pem(data: &[u8], path: &Path) -> Result<Vec<(String, StoreEntry)>, LoadError> {
    let blocks = ::pem::parse_many(data).map_err(|e| LoadError::MalformedStore {
        path: path.display().to_string(),
        message: format!("Failed to parse PEM: {}", e),
    })?;

    if blocks.is_empty() {
        return Err(LoadError::MalformedStore {
            path: path.display().to_string(),
            message: "No PEM blocks found".to_string(),
        });
    }

    let mut counters: BTreeMap<String, usize> = BTreeMap::new();
    let mut entries = Vec::with_capacity(blocks.len());

    for block in blocks {
        let slug = pem_alias_prefix(block.tag());
        let counter = counters.entry(slug.clone()).or_insert(0);
        let alias = format!("{}-{}", slug, counter);
        *counter += 1;

        let entry = if block.tag() == "CERTIFICATE" {
            StoreEntry::X509 {
                der: block.into_contents(),
            }
        } else {
            StoreEntry::NonX509 {
                kind: block.tag().to_string(),
            }
        };
        entries.push((alias, entry));
    }

    Ok(entries)
}

fn pem_alias_prefix(tag: &str) -> String {
    match tag {
        "CERTIFICATE" => "cert".to_string(),
        other => other.to_lowercase().replace(' ', "-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pkcs12_heuristic_rejects_text() {
        assert!(!is_likely_pkcs12(b"this is not a keystore"));
        assert!(!is_likely_pkcs12(&[0x30, 0x82]));
    }

    #[test]
    fn test_pkcs12_heuristic_accepts_pfx_header() {
        // SEQUENCE { INTEGER 3, SEQUENCE { OID pkcs7-data ...
        let header = [
            0x30, 0x82, 0x0a, 0x8c, 0x02, 0x01, 0x03, 0x30, 0x82, 0x0a, 0x52, 0x06, 0x09, 0x2a,
            0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x01,
        ];
        assert!(is_likely_pkcs12(&header));
    }

    #[test]
    fn test_pem_alias_prefix() {
        assert_eq!(pem_alias_prefix("CERTIFICATE"), "cert");
        assert_eq!(pem_alias_prefix("PRIVATE KEY"), "private-key");
        assert_eq!(pem_alias_prefix("X509 CRL"), "x509-crl");
    }

    #[test]
    fn test_entry_lookup_last_write_wins() {
        let store = CertificateStore::from_entries(
            StoreFormat::Pkcs12,
            vec![
                (
                    "dup".to_string(),
                    StoreEntry::NonX509 {
                        kind: "first".to_string(),
                    },
                ),
                ("dup".to_string(), StoreEntry::X509 { der: vec![0x30] }),
            ],
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.entry("dup").and_then(StoreEntry::x509_der), Some(&[0x30u8][..]));
        assert!(store.entry("missing").is_none());
    }

    #[test]
    fn test_load_pem_without_blocks_is_malformed() {
        let err = load_pem(b"nothing here", Path::new("bundle.pem")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedStore { .. }));
    }
}
