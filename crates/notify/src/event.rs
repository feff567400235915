//! The notification event and shared message formatting.
//!
//! Every channel renders the same two events; the field set exposed here
//! (order id, customer name/email/phone, itemized list, address line,
//! payment method, total) is the compatibility surface the external
//! templates consume.

use serde_json::Value;

use walkway_engine::{LineItem, NotificationKind, Order, UserProfile};

/// An event worth telling the admin about.
#[derive(Debug, Clone)]
pub enum NotifyEvent {
    /// An order was just confirmed.
    NewOrder(Order),
    /// A new account was just created.
    NewRegistration(UserProfile),
}

impl NotifyEvent {
    /// The matching notification-log kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::NewOrder(_) => NotificationKind::NewOrder,
            Self::NewRegistration(_) => NotificationKind::NewRegistration,
        }
    }

    /// Alert headline.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NewOrder(_) => "New Order Received!",
            Self::NewRegistration(_) => "New User Registered!",
        }
    }

    /// One-line alert body.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::NewOrder(order) => format!(
                "Order {} from {} - {}",
                order.order_id, order.customer.name, order.total
            ),
            Self::NewRegistration(user) => {
                format!("{} just created an account", user.full_name())
            }
        }
    }

    /// Short message for the admin notification log.
    #[must_use]
    pub fn log_message(&self) -> String {
        match self {
            Self::NewOrder(order) => {
                format!("Order {} from {}", order.order_id, order.customer.name)
            }
            Self::NewRegistration(user) => {
                format!("{} ({}) registered", user.full_name(), user.email)
            }
        }
    }

    /// The full event as JSON, for log payloads and webhook bodies.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::NewOrder(order) => serde_json::to_value(order).unwrap_or(Value::Null),
            Self::NewRegistration(user) => serde_json::to_value(user).unwrap_or(Value::Null),
        }
    }
}

/// Render an order's lines the way every text template shows them:
/// one `{name} (Qty: {n}) - {line total}` per line.
#[must_use]
pub fn items_list(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{} (Qty: {}) - {}",
                item.name,
                item.quantity,
                item.line_total()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::testing::sample_order;
    use super::*;

    #[test]
    fn test_items_list() {
        let order = sample_order();
        assert_eq!(
            items_list(&order.items),
            "Trail Runner (Qty: 2) - ₹1000\nLoafer (Qty: 1) - ₹150"
        );
    }

    #[test]
    fn test_order_summary() {
        let event = NotifyEvent::NewOrder(sample_order());
        assert_eq!(event.title(), "New Order Received!");
        assert_eq!(event.summary(), "Order ORD-TEST123 from Asha Rao - ₹1249");
        assert_eq!(event.kind(), NotificationKind::NewOrder);
    }

    #[test]
    fn test_payload_exposes_wire_fields() {
        let event = NotifyEvent::NewOrder(sample_order());
        let payload = event.payload();
        assert_eq!(
            payload.pointer("/orderId"),
            Some(&serde_json::json!("ORD-TEST123"))
        );
        assert!(payload.pointer("/customerInfo/pincode").is_some());
    }
}
