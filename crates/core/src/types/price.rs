//! Price representation using decimal arithmetic.
//!
//! Square reports prices in minor currency units (cents for USD). Everything
//! downstream of the catalog - cart lines, order payloads, displayed totals -
//! works in major units, so the conversion lives here in one place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency code used when the provider omits one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A price in major currency units (e.g., dollars, not cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "EUR").
    pub currency: String,
}

impl Price {
    /// Create a price directly from a major-unit amount.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Convert a minor-unit amount (e.g., cents) into a major-unit price.
    ///
    /// `Price::from_minor_units(350, "USD")` is $3.50.
    #[must_use]
    pub fn from_minor_units(minor: i64, currency: impl Into<String>) -> Self {
        Self {
            amount: Decimal::new(minor, 2),
            currency: currency.into(),
        }
    }

    /// A zero price in the given currency.
    #[must_use]
    pub fn zero(currency: impl Into<String>) -> Self {
        Self::from_minor_units(0, currency)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_units() {
        let price = Price::from_minor_units(350, "USD");
        assert_eq!(price.amount, Decimal::new(350, 2));
        assert_eq!(price.to_string(), "3.50 USD");
    }

    #[test]
    fn test_from_minor_units_zero() {
        let price = Price::zero(DEFAULT_CURRENCY);
        assert_eq!(price.amount, Decimal::ZERO);
        assert_eq!(price.to_string(), "0.00 USD");
    }

    #[test]
    fn test_display_pads_to_two_places() {
        let price = Price::from_minor_units(500, "EUR");
        assert_eq!(price.to_string(), "5.00 EUR");
    }

    #[test]
    fn test_serializes_amount_as_string() {
        // serde-with-str keeps decimal amounts exact on the wire
        let price = Price::from_minor_units(1999, "USD");
        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["amount"], "19.99");
        assert_eq!(json["currency"], "USD");
    }
}
