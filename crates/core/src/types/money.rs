//! Exact-decimal money amounts.
//!
//! Persisted line items written by older pages carry prices as JSON numbers,
//! numeric strings (sometimes with a currency sign or digit grouping), or
//! outright garbage. [`Money`] deserializes all of them: anything that cannot
//! be read as a non-negative decimal coerces to zero instead of poisoning
//! every total derived from it.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store currency (rupees), exact decimal.
///
/// ## Examples
///
/// ```
/// use walkway_core::Money;
///
/// let price = Money::from(500);
/// assert_eq!(price * 2 + Money::from(150), Money::from(1150));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(from = "RawMoney")]
pub struct Money(Decimal);

impl Money {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0.normalize())
    }
}

impl From<i64> for Money {
    fn from(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Accepts numbers, numeric strings, and malformed values when deserializing.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMoney {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl From<RawMoney> for Money {
    fn from(raw: RawMoney) -> Self {
        let amount = match raw {
            RawMoney::Number(n) => parse_decimal(&n.to_string()),
            RawMoney::Text(s) => parse_decimal(&s),
            RawMoney::Other(_) => Decimal::ZERO,
        };
        // Prices are non-negative; a negative stored value is as corrupt as a
        // non-numeric one.
        Self(amount.max(Decimal::ZERO))
    }
}

/// Parse a decimal out of loosely-formatted text, zero on failure.
///
/// Strips a leading currency sign and digit-grouping commas before parsing,
/// matching how prices appear in rendered listings (`₹1,299`).
fn parse_decimal(text: &str) -> Decimal {
    let cleaned: String = text
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_json_number() {
        let m: Money = serde_json::from_str("500").unwrap();
        assert_eq!(m, Money::from(500));

        let m: Money = serde_json::from_str("499.5").unwrap();
        assert_eq!(m, Money::new(Decimal::from_str("499.5").unwrap()));
    }

    #[test]
    fn test_deserialize_numeric_string() {
        let m: Money = serde_json::from_str("\"500\"").unwrap();
        assert_eq!(m, Money::from(500));
    }

    #[test]
    fn test_deserialize_formatted_string() {
        let m: Money = serde_json::from_str("\"₹1,299\"").unwrap();
        assert_eq!(m, Money::from(1299));
    }

    #[test]
    fn test_corrupt_values_coerce_to_zero() {
        for corrupt in ["null", "true", "\"not a price\"", "{}", "[1,2]"] {
            let m: Money = serde_json::from_str(corrupt).unwrap();
            assert_eq!(m, Money::ZERO, "expected zero for {corrupt}");
        }
    }

    #[test]
    fn test_negative_values_clamp_to_zero() {
        let m: Money = serde_json::from_str("-500").unwrap();
        assert_eq!(m, Money::ZERO);
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let subtotal = Money::from(500) * 2 + Money::from(150);
        assert_eq!(subtotal, Money::from(1150));
        assert_eq!(subtotal + Money::from(99), Money::from(1249));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from(1), Money::from(2), Money::from(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from(6));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from(1249).to_string(), "₹1249");
        assert_eq!(
            Money::new(Decimal::from_str("499.50").unwrap()).to_string(),
            "₹499.5"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = Money::new(Decimal::from_str("499.50").unwrap());
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
