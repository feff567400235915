//! Identifier types for products and orders.
//!
//! Product identifiers in persisted cart/wishlist data arrive as either JSON
//! numbers or strings depending on which page wrote them. [`ProductId`]
//! normalizes every representation to one canonical string at construction so
//! that lookups never need loose, type-coercing comparisons.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A canonical product identifier.
///
/// Construction normalizes the raw value:
/// - surrounding whitespace is trimmed;
/// - numeric-looking values (`7`, `"7"`, `"7.0"`, `"007"`) collapse to a
///   single canonical decimal rendering, so the number `7` and the string
///   `"7.0"` denote the same product;
/// - anything else is kept verbatim (minus trimming).
///
/// ## Examples
///
/// ```
/// use walkway_core::ProductId;
///
/// assert_eq!(ProductId::new("7"), ProductId::new("007"));
/// assert_eq!(ProductId::new("7.0"), ProductId::from(7_i64));
/// assert_ne!(ProductId::new("sku-7"), ProductId::new("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawProductId")]
pub struct ProductId(String);

impl ProductId {
    /// Create a canonical product ID from a raw value.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Decimal::from_str(trimmed) {
            Ok(numeric) => Self(numeric.normalize().to_string()),
            Err(_) => Self(trimmed.to_owned()),
        }
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ProductId {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<i64> for ProductId {
    fn from(raw: i64) -> Self {
        Self(Decimal::from(raw).normalize().to_string())
    }
}

impl From<u64> for ProductId {
    fn from(raw: u64) -> Self {
        Self(Decimal::from(raw).normalize().to_string())
    }
}

/// Accepts both JSON numbers and JSON strings when deserializing.
///
/// `serde_json::Number` keeps the exact textual form, so large integer ids do
/// not round-trip through `f64`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawProductId> for ProductId {
    fn from(raw: RawProductId) -> Self {
        match raw {
            RawProductId::Number(n) => Self::new(&n.to_string()),
            RawProductId::Text(s) => Self::new(&s),
        }
    }
}

/// A unique order identifier.
///
/// Generated as `ORD-` followed by an uppercase UUID v4, which is unique
/// across the lifetime of the store without a collision check against
/// existing history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Mint a fresh order ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "ORD-{}",
            Uuid::new_v4().simple().to_string().to_uppercase()
        ))
    }

    /// The order ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
