//! Certificate fingerprints

use sha1::Sha1;
use sha2::{Digest, Sha256};

/// SHA-256 of `der` as uppercase hex without separators
pub fn sha256_hex(der: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(der))
}

/// SHA-1 of `der` as uppercase hex without separators
pub fn sha1_hex(der: &[u8]) -> String {
    hex::encode_upper(Sha1::digest(der))
}
