//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are fixed-point decimals (never floats) so that line totals and
//! order totals are exact. A [`Price`] is always non-negative; the
//! constructor and the string parser both reject negative amounts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing or parsing a price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount could not be parsed as a decimal number.
    #[error("not a valid decimal number")]
    NotANumber,

    /// The amount was negative.
    #[error("price must not be negative")]
    Negative,
}

/// A non-negative price in the store's currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is negative.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str_exact(s.trim()).map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let price: Price = "10.00".parse().unwrap();
        assert_eq!(price.amount(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert_eq!("-1.50".parse::<Price>(), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("free".parse::<Price>(), Err(PriceError::NotANumber));
        assert_eq!("".parse::<Price>(), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_zero_is_allowed() {
        let price: Price = "0".parse().unwrap();
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_line_total() {
        let price: Price = "10.00".parse().unwrap();
        assert_eq!(price.times(3), Decimal::new(3000, 2));
    }

    #[test]
    fn test_display_two_places() {
        let price: Price = "4.5".parse().unwrap();
        assert_eq!(price.to_string(), "4.50");
    }
}
