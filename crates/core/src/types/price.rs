//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// No value was entered.
    #[error("price is required")]
    Missing,
    /// The input is not a number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
}

/// A strictly positive asking price.
///
/// Prices are serialized as decimal strings (`"19.99"`) so they survive a
/// round trip through the key-value store without float drift. Deserializing
/// applies the same positivity check as [`Price::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a whole amount, as used by seeded catalog data.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotPositive` for zero or negative amounts.
    pub fn from_whole(amount: i64) -> Result<Self, PriceError> {
        Self::try_from(Decimal::from(amount))
    }

    /// Parse a price typed into the sell form.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, is not a decimal number,
    /// or is not greater than zero.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PriceError::Missing);
        }

        let amount: Decimal = input.parse().map_err(|_| PriceError::NotANumber)?;
        Self::try_from(amount)
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount.normalize()))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let price = Price::parse("19.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(1999, 2));
        assert_eq!(price.to_string(), "$19.99");
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        assert_eq!(Price::parse("0"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("-5"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("0.00"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_parse_rejects_missing_and_garbage() {
        assert_eq!(Price::parse(""), Err(PriceError::Missing));
        assert_eq!(Price::parse("  "), Err(PriceError::Missing));
        assert_eq!(Price::parse("cheap"), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_from_whole_displays_two_places() {
        assert_eq!(Price::from_whole(1100).unwrap().to_string(), "$1100.00");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Price::parse("45").unwrap()).unwrap();
        assert_eq!(json, "\"45\"");
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        assert!(serde_json::from_str::<Price>("\"-5\"").is_err());
        assert!(serde_json::from_str::<Price>("\"0\"").is_err());
        assert_eq!(
            serde_json::from_str::<Price>("\"19.99\"").unwrap(),
            Price::parse("19.99").unwrap()
        );
    }
}
