//! Account address type with `tess_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A Tessera account address, always prefixed with `tess_`.
///
/// The body after the prefix is restricted to lowercase base36 plus `_`
/// (the alphabet the key-derivation encoder emits). The same address type
/// identifies validator operators and delegators; whether an address
/// belongs to a bonded validator is decided by looking it up in the
/// validator set, not by the address itself.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must start with tess_: {0:?}")]
    BadPrefix(String),

    #[error("address body must be non-empty lowercase base36: {0:?}")]
    BadBody(String),
}

impl Address {
    /// The standard prefix for all Tessera addresses.
    pub const PREFIX: &'static str = "tess_";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address; use the
    /// `FromStr` impl for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        match s.parse() {
            Ok(addr) => addr,
            Err(e) => panic!("{e}"),
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the `tess_` prefix.
    pub fn body(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }
}

fn body_char_ok(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, AddressError> {
        let Some(body) = s.strip_prefix(Self::PREFIX) else {
            return Err(AddressError::BadPrefix(s.to_string()));
        };
        if body.is_empty() || !body.chars().all(body_char_ok) {
            return Err(AddressError::BadBody(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_well_formed_addresses() {
        let addr: Address = "tess_val0".parse().unwrap();
        assert_eq!(addr.as_str(), "tess_val0");
        assert_eq!(addr.body(), "val0");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert_eq!(
            "cosmos_abc".parse::<Address>(),
            Err(AddressError::BadPrefix("cosmos_abc".to_string()))
        );
    }

    #[test]
    fn parse_rejects_empty_or_uppercase_body() {
        assert!(matches!(
            "tess_".parse::<Address>(),
            Err(AddressError::BadBody(_))
        ));
        assert!(matches!(
            "tess_Alice".parse::<Address>(),
            Err(AddressError::BadBody(_))
        ));
    }
}
