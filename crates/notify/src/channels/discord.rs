//! Discord webhook channel.

use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::{ChannelError, ChannelResult, NotificationChannel, ensure_success, into_result};
use crate::config::DiscordConfig;
use crate::event::{NotifyEvent, items_list};

/// Embed accent color (the storefront's amber).
const EMBED_COLOR: u32 = 0x00f3_9c12;

/// Posts an embed to a Discord incoming webhook.
pub struct DiscordChannel {
    config: Option<DiscordConfig>,
    client: Client,
}

impl DiscordChannel {
    #[must_use]
    pub fn new(config: Option<DiscordConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn post(&self, url: &str, event: &NotifyEvent) -> Result<(), ChannelError> {
        let body = json!({ "embeds": [embed(event)] });
        let response = self.client.post(url).json(&body).send().await?;
        ensure_success(response).await?;
        debug!("discord notification sent");
        Ok(())
    }
}

impl NotificationChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
        Box::pin(async move {
            let Some(config) = self.config.as_ref() else {
                return ChannelResult::not_configured(self.name());
            };
            into_result(self.name(), self.post(&config.webhook_url, event).await)
        })
    }
}

/// The embed payload for `event`.
fn embed(event: &NotifyEvent) -> serde_json::Value {
    match event {
        NotifyEvent::NewOrder(order) => json!({
            "title": "🛍️ New Order Alert - WalkWay",
            "color": EMBED_COLOR,
            "fields": [
                { "name": "Order ID", "value": order.order_id.to_string(), "inline": true },
                { "name": "Customer", "value": order.customer.name.clone(), "inline": true },
                { "name": "Email", "value": order.customer.email.to_string(), "inline": true },
                { "name": "Phone", "value": order.customer.phone.clone(), "inline": true },
                { "name": "Total Amount", "value": order.total.to_string(), "inline": true },
                { "name": "Payment Method", "value": order.payment_method.to_string(), "inline": true },
                { "name": "Items", "value": items_list(&order.items), "inline": false },
                { "name": "Address", "value": order.customer.address_line(), "inline": false },
            ],
            "timestamp": order.placed_at.to_rfc3339(),
            "footer": { "text": "WalkWay E-commerce" },
        }),
        NotifyEvent::NewRegistration(user) => json!({
            "title": "🎉 New Registration - WalkWay",
            "color": EMBED_COLOR,
            "fields": [
                { "name": "Name", "value": user.full_name(), "inline": true },
                { "name": "Email", "value": user.email.to_string(), "inline": true },
                { "name": "Phone", "value": user.phone.clone(), "inline": true },
            ],
            "timestamp": user.joined_at.to_rfc3339(),
            "footer": { "text": "WalkWay E-commerce" },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::testing::{sample_order, sample_user};

    #[tokio::test]
    async fn test_unconfigured_short_circuits() {
        let channel = DiscordChannel::new(None);
        let result = channel.send(&NotifyEvent::NewOrder(sample_order())).await;
        assert_eq!(result, ChannelResult::not_configured("discord"));
    }

    #[test]
    fn test_order_embed_fields() {
        let value = embed(&NotifyEvent::NewOrder(sample_order()));
        assert_eq!(value["title"], "🛍️ New Order Alert - WalkWay");

        let fields = value["fields"].as_array().expect("fields array");
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0]["value"], "ORD-TEST123");
        assert_eq!(fields[4]["value"], "₹1249");
        assert_eq!(fields[5]["value"], "Cash on Delivery");
        assert_eq!(
            fields[7]["value"],
            "12 MG Road, Bengaluru - 560001"
        );
    }

    #[test]
    fn test_registration_embed() {
        let value = embed(&NotifyEvent::NewRegistration(sample_user()));
        assert_eq!(value["title"], "🎉 New Registration - WalkWay");
        assert_eq!(value["fields"][0]["value"], "Asha Rao");
    }
}
