//! Telegram bot channel.

use futures::future::BoxFuture;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use super::{ChannelError, ChannelResult, NotificationChannel, ensure_success, into_result};
use crate::config::TelegramConfig;
use crate::event::{NotifyEvent, items_list};

/// Telegram Bot API base URL.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Sends an HTML-formatted message via a Telegram bot.
pub struct TelegramChannel {
    config: Option<TelegramConfig>,
    client: Client,
}

impl TelegramChannel {
    #[must_use]
    pub fn new(config: Option<TelegramConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn post(&self, config: &TelegramConfig, event: &NotifyEvent) -> Result<(), ChannelError> {
        let url = format!(
            "{TELEGRAM_API_BASE}/bot{}/sendMessage",
            config.bot_token.expose_secret()
        );
        let body = json!({
            "chat_id": config.chat_id.clone(),
            "text": message_html(event),
            "parse_mode": "HTML",
        });

        let response = self.client.post(&url).json(&body).send().await?;
        ensure_success(response).await?;
        debug!("telegram notification sent");
        Ok(())
    }
}

impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
        Box::pin(async move {
            let Some(config) = self.config.as_ref() else {
                return ChannelResult::not_configured(self.name());
            };
            into_result(self.name(), self.post(config, event).await)
        })
    }
}

/// Telegram-flavored message body (`<b>` markup).
fn message_html(event: &NotifyEvent) -> String {
    match event {
        NotifyEvent::NewOrder(order) => format!(
            "🛍️ <b>New Order - WalkWay</b>\n\n\
             <b>Order ID:</b> {}\n\
             <b>Customer:</b> {}\n\
             <b>Email:</b> {}\n\
             <b>Phone:</b> {}\n\
             <b>Total:</b> {}\n\
             <b>Payment:</b> {}\n\n\
             <b>Items:</b>\n{}\n\n\
             <b>Address:</b>\n{}",
            order.order_id,
            order.customer.name,
            order.customer.email,
            order.customer.phone,
            order.total,
            order.payment_method,
            items_list(&order.items),
            order.customer.address_line(),
        ),
        NotifyEvent::NewRegistration(user) => format!(
            "🎉 <b>New Registration - WalkWay</b>\n\n\
             <b>Name:</b> {}\n\
             <b>Email:</b> {}\n\
             <b>Phone:</b> {}",
            user.full_name(),
            user.email,
            user.phone,
        ),
    }
}
