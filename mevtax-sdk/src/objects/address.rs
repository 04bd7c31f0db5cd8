//! EVM-style address newtype.
//!
//! Every participant ("bot") in the protocol is identified by a
//! `0x`-prefixed 20-byte hex address. Parsing normalizes to lowercase so
//! that the same address always hashes and compares equal regardless of
//! the checksum casing a client sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated, lowercase-normalized `0x…` address.
///
/// Construction goes through [`FromStr`] (or serde, which delegates to
/// it), so holding an `Address` is proof the string is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

/// Errors produced when parsing an address string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address must be 42 characters, got {0}")]
    BadLength(usize),
    #[error("address contains a non-hex character")]
    NonHex,
}

impl Address {
    /// The address as a lowercase `0x…` string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with("0x") {
            return Err(AddressParseError::MissingPrefix);
        }
        if s.len() != 42 {
            return Err(AddressParseError::BadLength(s.len()));
        }
        if !s[2..].bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressParseError::NonHex);
        }
        Ok(Address(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_case() {
        let addr: Address = "0xABCDEFabcdefABCDEFabcdefABCDEFabcdefABCD"
            .parse()
            .unwrap();
        assert_eq!(addr.as_str(), "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd");
    }

    #[test]
    fn rejects_missing_prefix() {
        let err = "1234567890123456789012345678901234567890ab"
            .parse::<Address>()
            .unwrap_err();
        assert_eq!(err, AddressParseError::MissingPrefix);
    }

    #[test]
    fn rejects_bad_length() {
        let err = "0x1234".parse::<Address>().unwrap_err();
        assert_eq!(err, AddressParseError::BadLength(6));
    }

    #[test]
    fn rejects_non_hex() {
        let err = "0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"
            .parse::<Address>()
            .unwrap_err();
        assert_eq!(err, AddressParseError::NonHex);
    }

    #[test]
    fn serde_round_trip() {
        let addr: Address = "0x1234567890123456789012345678901234567890"
            .parse()
            .unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x1234567890123456789012345678901234567890\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn serde_rejects_invalid() {
        assert!(serde_json::from_str::<Address>("\"not-an-address\"").is_err());
    }
}
