//! Hex address parsing and formatting utilities.

use std::num::ParseIntError;

/// Parse a hex address string (with or without 0x prefix).
///
/// # Examples
///
/// ```
/// use addrshort_core::hexfmt::parse_hex_u32;
///
/// assert_eq!(parse_hex_u32("0x1000").unwrap(), 0x1000);
/// assert_eq!(parse_hex_u32("004026C0").unwrap(), 0x004026C0);
/// ```
pub fn parse_hex_u32(s: &str) -> Result<u32, ParseIntError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(s, 16)
}

/// Parse a run of hex bytes, ignoring whitespace between them.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact)
}

/// Format bytes as space-separated upper-case pairs.
pub fn format_hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serde adapter for 32-bit addresses.
///
/// Accepts either a JSON number or a hex string and always writes `"0x%08X"`.
pub mod serde_u32 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{:08X}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => super::parse_hex_u32(&s)
                .map_err(|e| serde::de::Error::custom(format!("invalid hex value {s:?}: {e}"))),
        }
    }
}

/// Serde adapter for byte blobs written as hex text.
pub mod serde_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hex_bytes(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hex_bytes(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        #[serde(with = "serde_u32")]
        address: u32,
        #[serde(with = "serde_bytes")]
        bytes: Vec<u8>,
    }

    #[test]
    fn test_parse_hex_u32_with_prefix() {
        assert_eq!(parse_hex_u32("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_u32("0X1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_u32(" 0x10 ").unwrap(), 0x10);
    }

    #[test]
    fn test_parse_hex_u32_without_prefix() {
        assert_eq!(parse_hex_u32("DEADBEEF").unwrap(), 0xDEADBEEF);
        assert_eq!(parse_hex_u32("deadbeef").unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn test_parse_hex_u32_invalid() {
        assert!(parse_hex_u32("GHIJK").is_err());
        assert!(parse_hex_u32("0x").is_err());
        assert!(parse_hex_u32("0x100000000").is_err());
    }

    #[test]
    fn test_parse_hex_bytes() {
        assert_eq!(
            parse_hex_bytes("C0 26 40 00").unwrap(),
            vec![0xC0, 0x26, 0x40, 0x00]
        );
        assert_eq!(parse_hex_bytes("c0264000").unwrap().len(), 4);
        assert!(parse_hex_bytes("C0 2").is_err());
    }

    #[test]
    fn test_format_hex_bytes() {
        assert_eq!(format_hex_bytes(&[0xDE, 0xAD, 0x01]), "DE AD 01");
        assert_eq!(format_hex_bytes(&[]), "");
    }

    #[test]
    fn test_serde_accepts_number_or_string() {
        let from_string: Probe =
            serde_json::from_str(r#"{"address": "0x00400000", "bytes": "01 02"}"#).unwrap();
        let from_number: Probe =
            serde_json::from_str(r#"{"address": 4194304, "bytes": "0102"}"#).unwrap();
        assert_eq!(from_string, from_number);
        assert_eq!(from_string.address, 0x0040_0000);
    }

    #[test]
    fn test_serde_writes_padded_hex() {
        let probe = Probe {
            address: 0x1000,
            bytes: vec![0xAB],
        };
        let json = serde_json::to_string(&probe).unwrap();
        assert_eq!(json, r#"{"address":"0x00001000","bytes":"AB"}"#);
    }

    #[test]
    fn test_serde_rejects_bad_hex() {
        let result: Result<Probe, _> =
            serde_json::from_str(r#"{"address": "0xZZ", "bytes": ""}"#);
        assert!(result.is_err());
    }
}
