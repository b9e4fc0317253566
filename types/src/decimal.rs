//! Fixed-point decimal with 18 fractional places over an unbounded integer.
//!
//! Consensus-critical share and fraction math must be bit-exact across
//! independently built nodes, so `Dec` never touches floating point. A
//! value is stored as `value * 10^18` in a `num_bigint::BigUint`, additions
//! cannot overflow, and every division truncates toward zero.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional decimal digits carried by every `Dec`.
pub const DECIMAL_PLACES: u32 = 18;

/// `10^18`, the scaling factor between a `Dec` and its raw units.
pub fn scale_factor() -> BigUint {
    BigUint::from(10u32).pow(DECIMAL_PLACES)
}

/// A non-negative fixed-point decimal (18 places, unbounded magnitude).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigUint);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecError {
    #[error("invalid decimal string: {0:?}")]
    Invalid(String),

    #[error("too many fractional digits (max {DECIMAL_PLACES}): {0:?}")]
    Precision(String),
}

impl Dec {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn one() -> Self {
        Self(scale_factor())
    }

    /// The whole number `n` as a decimal.
    pub fn from_int(n: u128) -> Self {
        Self(BigUint::from(n) * scale_factor())
    }

    /// The fraction `numerator / denominator`, truncated to 18 places.
    ///
    /// A zero denominator yields zero (the callers' division-by-zero
    /// policy everywhere in the tally is "no power, not an error").
    pub fn from_ratio(numerator: u128, denominator: u128) -> Self {
        if denominator == 0 {
            return Self::zero();
        }
        Self(BigUint::from(numerator) * scale_factor() / BigUint::from(denominator))
    }

    /// Construct directly from raw units (`value * 10^18`).
    pub fn from_units(units: BigUint) -> Self {
        Self(units)
    }

    /// The raw units backing this decimal (`value * 10^18`).
    pub fn units(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, clamping at zero.
    pub fn saturating_sub(&self, other: &Self) -> Self {
        if other.0 >= self.0 {
            Self::zero()
        } else {
            Self(&self.0 - &other.0)
        }
    }
}

impl Add for Dec {
    type Output = Dec;
    fn add(self, rhs: Dec) -> Dec {
        Dec(self.0 + rhs.0)
    }
}

impl Add for &Dec {
    type Output = Dec;
    fn add(self, rhs: &Dec) -> Dec {
        Dec(&self.0 + &rhs.0)
    }
}

impl FromStr for Dec {
    type Err = DecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DecError::Invalid(s.to_string()));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(DecError::Invalid(s.to_string()));
        }
        if frac_part.len() > DECIMAL_PLACES as usize {
            return Err(DecError::Precision(s.to_string()));
        }
        let int_units = if int_part.is_empty() {
            BigUint::zero()
        } else {
            BigUint::from_str(int_part).map_err(|_| DecError::Invalid(s.to_string()))?
        };
        let frac_units = if frac_part.is_empty() {
            BigUint::zero()
        } else {
            let pad = DECIMAL_PLACES - frac_part.len() as u32;
            BigUint::from_str(frac_part).map_err(|_| DecError::Invalid(s.to_string()))?
                * BigUint::from(10u32).pow(pad)
        };
        Ok(Self(int_units * scale_factor() + frac_units))
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = scale_factor();
        let int_part = &self.0 / &scale;
        let frac_part = &self.0 % &scale;
        if frac_part.is_zero() {
            return write!(f, "{int_part}");
        }
        let frac = format!("{frac_part:0>width$}", width = DECIMAL_PLACES as usize);
        write!(f, "{}.{}", int_part, frac.trim_end_matches('0'))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_number() {
        let d: Dec = "42".parse().unwrap();
        assert_eq!(d, Dec::from_int(42));
    }

    #[test]
    fn parse_fraction() {
        let d: Dec = "0.334".parse().unwrap();
        assert_eq!(d, Dec::from_ratio(334, 1000));
    }

    #[test]
    fn parse_leading_dot() {
        let d: Dec = ".5".parse().unwrap();
        assert_eq!(d, Dec::from_ratio(1, 2));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Dec>().is_err());
        assert!(".".parse::<Dec>().is_err());
        assert!("1.2.3".parse::<Dec>().is_err());
        assert!("abc".parse::<Dec>().is_err());
        assert!("-1".parse::<Dec>().is_err());
    }

    #[test]
    fn parse_rejects_excess_precision() {
        let s = format!("0.{}", "1".repeat(19));
        assert_eq!(s.parse::<Dec>(), Err(DecError::Precision(s)));
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Dec::from_ratio(1, 2).to_string(), "0.5");
        assert_eq!(Dec::from_int(7).to_string(), "7");
        assert_eq!(Dec::from_ratio(334, 1000).to_string(), "0.334");
    }

    #[test]
    fn display_parse_round_trip() {
        for s in ["0", "1", "0.334", "123.000000000000000001"] {
            let d: Dec = s.parse().unwrap();
            assert_eq!(d.to_string().parse::<Dec>().unwrap(), d);
        }
    }

    #[test]
    fn from_ratio_truncates() {
        // 1/3 = 0.333...3 with exactly 18 digits, truncated not rounded
        let third = Dec::from_ratio(1, 3);
        assert_eq!(third.to_string(), "0.333333333333333333");
    }

    #[test]
    fn from_ratio_zero_denominator_is_zero() {
        assert_eq!(Dec::from_ratio(5, 0), Dec::zero());
    }

    #[test]
    fn ordering() {
        let a = Dec::from_ratio(1, 3);
        let b = Dec::from_ratio(1, 2);
        assert!(a < b);
        assert!(Dec::zero() < a);
        assert!(b < Dec::one());
    }

    #[test]
    fn saturating_sub_clamps_at_zero() {
        let a = Dec::from_int(1);
        let b = Dec::from_int(2);
        assert_eq!(a.saturating_sub(&b), Dec::zero());
        assert_eq!(b.saturating_sub(&a), Dec::from_int(1));
    }
}
