//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are kept unrounded. Rounding to cents only happens when a value is
//! formatted for display.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when building a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The amount was below zero.
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),

    /// The text could not be parsed as a number.
    #[error("price is not a number: {0:?}")]
    Invalid(String),
}

/// A non-negative menu price in the restaurant's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Parse a price typed into a form, e.g. `"8"`, `"3.50"` or `" 12.5 "`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Invalid` for non-numeric text and
    /// `PriceError::Negative` for amounts below zero.
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        let trimmed = text.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| PriceError::Invalid(text.to_owned()))?;
        Self::new(amount)
    }

    /// The unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display, rounded half away from zero to 2 decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        format_amount(self.0)
    }
}

/// Format any decimal amount as `$x.yy`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_numbers() {
        assert_eq!(Price::parse("8").unwrap().amount(), Decimal::new(8, 0));
        assert_eq!(Price::parse(" 3.50 ").unwrap().amount(), Decimal::new(350, 2));
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(Price::parse("-1"), Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse(""), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Price::parse("19.5").unwrap().display(), "$19.50");
        assert_eq!(Price::parse("2.345").unwrap().display(), "$2.35");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_display_keeps_amount_unrounded() {
        let price = Price::parse("2.345").unwrap();
        assert_eq!(price.amount(), Decimal::new(2345, 3));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("\"-4.00\"");
        assert!(result.is_err());
        let ok: Price = serde_json::from_str("\"4.00\"").unwrap();
        assert_eq!(ok.amount(), Decimal::new(400, 2));
    }
}
