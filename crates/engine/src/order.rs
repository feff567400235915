//! Checkout and order history.
//!
//! `place_order` is the one state transition in the system: cart contents
//! plus validated customer input become an immutable [`Order`] appended to
//! the `order-history` key, and the cart is cleared only after that append
//! has been made durable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use walkway_core::{Email, Money, OrderId, OrderStatus, PaymentMethod};

use crate::cart::{CartLedger, LineItem};
use crate::store::{Store, StoreError, keys};

/// Validated customer and shipping details.
///
/// Field names follow the checkout form the admin tooling already reads
/// (`pincode`, not `postal_code`, on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(rename = "pincode")]
    pub postal_code: String,
}

impl CustomerInfo {
    /// Single-line shipping address, as rendered in every notification
    /// template: `{address}, {city} - {pincode}`.
    #[must_use]
    pub fn address_line(&self) -> String {
        format!("{}, {} - {}", self.address, self.city, self.postal_code)
    }
}

/// Raw checkout form input, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl CustomerDraft {
    /// Validate the draft into a [`CustomerInfo`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] naming the first missing or
    /// malformed field.
    pub fn validate(self) -> Result<CustomerInfo, OrderError> {
        let require = |field: &'static str, value: String| -> Result<String, OrderError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(OrderError::Validation {
                    field,
                    reason: "required".to_owned(),
                });
            }
            Ok(trimmed.to_owned())
        };

        let name = require("name", self.name)?;
        let email = Email::parse(self.email.trim()).map_err(|e| OrderError::Validation {
            field: "email",
            reason: e.to_string(),
        })?;
        let phone = require("phone", self.phone)?;
        let address = require("address", self.address)?;
        let city = require("city", self.city)?;
        let postal_code = require("pincode", self.postal_code)?;

        Ok(CustomerInfo {
            name,
            email,
            phone,
            address,
            city,
            postal_code,
        })
    }
}

/// A placed order.
///
/// Immutable once created: nothing in the engine mutates a stored order, and
/// `orders()` hands out copies. Wire field names (`orderId`, `customerInfo`,
/// ...) are the compatibility surface consumed by notification templates and
/// the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub items: Vec<LineItem>,
    #[serde(rename = "customerInfo")]
    pub customer: CustomerInfo,
    pub payment_method: PaymentMethod,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout attempted with nothing in the cart.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// A required field is missing or malformed.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The store rejected a write; nothing was applied.
    #[error("failed to persist order: {0}")]
    Persistence(#[from] StoreError),
}

/// Order placement and history access.
#[derive(Debug, Clone)]
pub struct Checkout {
    store: Store,
    shipping_fee: Money,
}

impl Checkout {
    /// Flat shipping fee charged on every order, in rupees.
    pub const FLAT_SHIPPING_FEE: i64 = 99;

    /// Create a checkout with the standard flat shipping fee.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self::with_shipping_fee(store, Money::from(Self::FLAT_SHIPPING_FEE))
    }

    /// Create a checkout with a custom shipping fee.
    #[must_use]
    pub const fn with_shipping_fee(store: Store, shipping_fee: Money) -> Self {
        Self {
            store,
            shipping_fee,
        }
    }

    /// Place an order from the current cart contents.
    ///
    /// On success the order has been appended to history, the cart is empty,
    /// and both are durable. On any error neither the cart nor the history
    /// has changed: the history append happens first, and the cart is only
    /// cleared once that write succeeds. If clearing the cart then fails,
    /// the freshly appended order is rolled back before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`] if the cart has no items
    /// - [`OrderError::Validation`] if customer input fails validation
    /// - [`OrderError::Persistence`] if a store write fails
    #[instrument(skip(self, cart, customer), fields(payment = %payment_method))]
    pub fn place_order(
        &self,
        cart: &mut CartLedger,
        customer: CustomerDraft,
        payment_method: PaymentMethod,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let customer = customer.validate()?;

        let items = cart.snapshot();
        let subtotal: Money = items.iter().map(LineItem::line_total).sum();
        let order = Order {
            order_id: OrderId::generate(),
            items,
            customer,
            payment_method,
            subtotal,
            shipping_fee: self.shipping_fee,
            total: subtotal + self.shipping_fee,
            placed_at: Utc::now(),
            status: OrderStatus::Confirmed,
        };

        let previous = self.orders();
        let mut history = previous.clone();
        history.push(order.clone());
        self.store.set(keys::ORDER_HISTORY, &history)?;

        if let Err(clear_err) = cart.clear() {
            // The cart is the user's only copy of their intent; losing the
            // clear means the order must not stand either.
            if let Err(rollback_err) = self.store.set(keys::ORDER_HISTORY, &previous) {
                warn!(%rollback_err, "failed to roll back order history after cart clear failure");
            }
            return Err(clear_err.into());
        }

        info!(order_id = %order.order_id, total = %order.total, "order placed");
        Ok(order)
    }

    /// All placed orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.store.get(keys::ORDER_HISTORY).unwrap_or_default()
    }
}
