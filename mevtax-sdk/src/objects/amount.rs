//! Smallest-unit token amounts on the wire.
//!
//! Channel amounts are 256-bit unsigned integers in the source domain;
//! `u128` comfortably covers every realistic tax balance. JSON numbers
//! cannot carry that range safely, so amounts travel as decimal strings
//! (`"1250000000000000000"`), matching how the original backend
//! stringified its bigints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative smallest-unit amount, serialized as a decimal string.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct WeiAmount(pub u128);

/// Errors produced when parsing a wire amount.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("amount is not a base-10 unsigned integer: {0}")]
    NotAnInteger(String),
}

impl WeiAmount {
    pub const ZERO: WeiAmount = WeiAmount(0);

    pub fn value(self) -> u128 {
        self.0
    }
}

impl From<u128> for WeiAmount {
    fn from(value: u128) -> Self {
        WeiAmount(value)
    }
}

impl FromStr for WeiAmount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(WeiAmount)
            .map_err(|_| AmountParseError::NotAnInteger(s.to_owned()))
    }
}

impl TryFrom<String> for WeiAmount {
    type Error = AmountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeiAmount> for String {
    fn from(value: WeiAmount) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&WeiAmount(800)).unwrap();
        assert_eq!(json, "\"800\"");
    }

    #[test]
    fn deserializes_large_values() {
        let amount: WeiAmount = serde_json::from_str("\"340282366920938463463374607431768211455\"")
            .unwrap();
        assert_eq!(amount.value(), u128::MAX);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<WeiAmount>("\"-5\"").is_err());
        assert!(serde_json::from_str::<WeiAmount>("\"1.5\"").is_err());
        assert!(serde_json::from_str::<WeiAmount>("\"abc\"").is_err());
    }
}
