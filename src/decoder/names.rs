//! Distinguished name and general name rendering

use crate::models::SubjectAltName;
use std::net::{Ipv4Addr, Ipv6Addr};
use x509_parser::prelude::*;
use x509_parser::x509::AttributeTypeAndValue;

/// GeneralName CHOICE labels, indexed by context tag number (RFC 5280 4.2.1.6)
const GENERAL_NAME_TYPES: [&str; 9] = [
    "otherName",
    "rfc822Name",
    "dNSName",
    "x400Address",
    "directoryName",
    "ediPartyName",
    "uniformResourceIdentifier",
    "iPAddress",
    "registeredID",
];

/// Attribute type short names used in RFC 4514 strings
const ATTRIBUTE_SHORT_NAMES: &[(&str, &str)] = &[
    ("2.5.4.3", "CN"),
    ("2.5.4.4", "SURNAME"),
    ("2.5.4.5", "SERIALNUMBER"),
    ("2.5.4.6", "C"),
    ("2.5.4.7", "L"),
    ("2.5.4.8", "ST"),
    ("2.5.4.9", "STREET"),
    ("2.5.4.10", "O"),
    ("2.5.4.11", "OU"),
    ("2.5.4.12", "T"),
    ("2.5.4.42", "GIVENNAME"),
    ("0.9.2342.19200300.100.1.1", "UID"),
    ("0.9.2342.19200300.100.1.25", "DC"),
    ("1.2.840.113549.1.9.1", "EMAILADDRESS"),
];

/// Label for a general-name type code. Total: codes outside 0-8 render as
/// `unknown(<code>)`.
pub fn general_name_type_label(code: u32) -> String {
    usize::try_from(code)
        .ok()
        .and_then(|i| GENERAL_NAME_TYPES.get(i))
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("unknown({})", code))
}

/// Convert one parsed general name into its type code and rendered value
pub fn subject_alt_name(name: &GeneralName) -> SubjectAltName {
    let (type_code, value) = match name {
        GeneralName::OtherName(oid, value) => {
            (0, format!("{}:{}", oid.to_id_string(), hex::encode(value)))
        }
        GeneralName::RFC822Name(email) => (1, email.to_string()),
        GeneralName::DNSName(dns) => (2, dns.to_string()),
        GeneralName::X400Address(any) => (3, hex::encode(any.data)),
        GeneralName::DirectoryName(dn) => (4, distinguished_name(dn)),
        GeneralName::EDIPartyName(any) => (5, hex::encode(any.data)),
        GeneralName::URI(uri) => (6, uri.to_string()),
        GeneralName::IPAddress(ip) => (7, ip_address(ip)),
        GeneralName::RegisteredID(oid) => (8, oid.to_id_string()),
    };

    SubjectAltName {
        type_code,
        label: general_name_type_label(type_code),
        value,
    }
}

/// Render an iPAddress value. 4 and 16 byte values are addresses; 8 and 32
/// byte values are address/mask pairs as used in name constraints.
pub fn ip_address(bytes: &[u8]) -> String {
    match bytes.len() {
        4 => Ipv4Addr::from(octets::<4>(bytes)).to_string(),
        16 => Ipv6Addr::from(octets::<16>(bytes)).to_string(),
        8 => format!(
            "{}/{}",
            Ipv4Addr::from(octets::<4>(&bytes[..4])),
            Ipv4Addr::from(octets::<4>(&bytes[4..]))
        ),
        32 => format!(
            "{}/{}",
            Ipv6Addr::from(octets::<16>(&bytes[..16])),
            Ipv6Addr::from(octets::<16>(&bytes[16..]))
        ),
        _ => hex::encode(bytes),
    }
}

fn octets<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

/// Render a name as an RFC 4514 string: RDNs in reverse encoding order,
/// comma separated, multi-valued RDNs joined with `+`.
pub fn distinguished_name(name: &X509Name) -> String {
    let rdns: Vec<String> = name
        .iter()
        .map(|rdn| {
            rdn.iter()
                .map(attribute)
                .collect::<Vec<_>>()
                .join("+")
        })
        .collect();

    rdns.into_iter().rev().collect::<Vec<_>>().join(",")
}

fn attribute(attr: &AttributeTypeAndValue) -> String {
    let oid = attr.attr_type().to_id_string();
    let short_name = ATTRIBUTE_SHORT_NAMES
        .iter()
        .find(|(key, _)| *key == oid)
        .map(|(_, name)| *name);

    match (short_name, attr.as_str()) {
        (Some(name), Ok(value)) => format!("{}={}", name, escape_value(value)),
        (Some(name), Err(_)) => format!("{}=#{}", name, hex::encode(attr.attr_value().data)),
        (None, _) => format!("{}=#{}", oid, hex::encode(attr.attr_value().data)),
    }
}

/// Escape an attribute value per RFC 4514 section 2.4
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let last = value.chars().count().saturating_sub(1);

    for (i, c) in value.chars().enumerate() {
        match c {
            '"' | '+' | ',' | ';' | '<' | '>' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '#' if i == 0 => out.push_str("\\#"),
            ' ' if i == 0 || i == last => out.push_str("\\ "),
            '\0' => out.push_str("\\00"),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_name_labels_are_fixed_for_known_codes() {
        let expected = [
            "otherName",
            "rfc822Name",
            "dNSName",
            "x400Address",
            "directoryName",
            "ediPartyName",
            "uniformResourceIdentifier",
            "iPAddress",
            "registeredID",
        ];
        for (code, label) in expected.iter().enumerate() {
            assert_eq!(general_name_type_label(code as u32), *label);
        }
    }

    #[test]
    fn test_general_name_labels_fall_back_to_unknown() {
        assert_eq!(general_name_type_label(9), "unknown(9)");
        assert_eq!(general_name_type_label(30), "unknown(30)");
        assert_eq!(general_name_type_label(u32::MAX), format!("unknown({})", u32::MAX));
    }

    #[test]
    fn test_ip_address_rendering() {
        assert_eq!(ip_address(&[192, 0, 2, 10]), "192.0.2.10");

        let mut v6 = [0u8; 16];
        v6[0] = 0x20;
        v6[1] = 0x01;
        v6[2] = 0x0d;
        v6[3] = 0xb8;
        v6[15] = 0x01;
        assert_eq!(ip_address(&v6), "2001:db8::1");

        assert_eq!(
            ip_address(&[10, 0, 0, 0, 255, 0, 0, 0]),
            "10.0.0.0/255.0.0.0"
        );
        assert_eq!(ip_address(&[1, 2, 3]), "010203");
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("Example Org"), "Example Org");
        assert_eq!(escape_value("Acme, Inc."), "Acme\\, Inc.");
        assert_eq!(escape_value("#hash"), "\\#hash");
        assert_eq!(escape_value(" padded "), "\\ padded\\ ");
        assert_eq!(escape_value("a+b=c"), "a\\+b=c");
    }

    #[test]
    fn test_subject_alt_name_dns() {
        let san = subject_alt_name(&GeneralName::DNSName("example.com"));
        assert_eq!(san.type_code, 2);
        assert_eq!(san.to_string(), "dNSName: example.com");
    }

    #[test]
    fn test_subject_alt_name_ip() {
        let san = subject_alt_name(&GeneralName::IPAddress(&[127, 0, 0, 1]));
        assert_eq!(san.to_string(), "iPAddress: 127.0.0.1");
    }
}
