//! Token amount type.
//!
//! All on-ledger arithmetic is done in raw `utess` units (u128) to avoid
//! floating-point errors; one whole TESS is `10^6` utess.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A token amount in raw `utess` units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    /// The raw-unit denomination used on the wire and in stores.
    pub const DENOM: &'static str = "utess";

    /// Raw units per whole TESS.
    pub const UNITS_PER_TESS: u128 = 1_000_000;

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// A whole-TESS amount, converted to raw units.
    pub fn from_tess(tess: u64) -> Self {
        Self(u128::from(tess) * Self::UNITS_PER_TESS)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// The whole-TESS part of this amount, truncated.
    pub fn whole_tess(&self) -> u128 {
        self.0 / Self::UNITS_PER_TESS
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, Self::DENOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tess_conversion_round_trips_whole_amounts() {
        let amount = TokenAmount::from_tess(42);
        assert_eq!(amount.raw(), 42_000_000);
        assert_eq!(amount.whole_tess(), 42);
    }

    #[test]
    fn whole_tess_truncates_sub_unit_dust() {
        assert_eq!(TokenAmount::new(1_999_999).whole_tess(), 1);
    }

    #[test]
    fn display_uses_raw_denomination() {
        assert_eq!(TokenAmount::new(150).to_string(), "150utess");
    }
}
