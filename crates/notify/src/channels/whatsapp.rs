//! WhatsApp deep-link channel.
//!
//! WhatsApp has no free server-side send API here; instead the channel
//! builds a `wa.me` deep link with the message pre-filled and hands it to
//! the surface layer to open, after a short pause so the on-screen alert is
//! seen first. "Success" means the link was handed off, not that anyone
//! pressed send.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tracing::{debug, info};

use super::{ChannelResult, NotificationChannel};
use crate::config::WhatsAppConfig;
use crate::event::{NotifyEvent, items_list};

/// Opens external links (a browser tab, `xdg-open`, a webview shell).
///
/// The default [`TracingLinkOpener`] just logs the URL.
pub trait LinkOpener: Send + Sync {
    /// Open `url` externally.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason if the link could not be opened.
    fn open(&self, url: &str) -> Result<(), String>;
}

/// Default opener: log the deep link instead of opening anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLinkOpener;

impl LinkOpener for TracingLinkOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        info!(url, "whatsapp deep link ready");
        Ok(())
    }
}

/// WhatsApp deep-link channel.
pub struct WhatsAppChannel {
    config: Option<WhatsAppConfig>,
    opener: Arc<dyn LinkOpener>,
}

impl WhatsAppChannel {
    #[must_use]
    pub fn new(config: Option<WhatsAppConfig>, opener: Arc<dyn LinkOpener>) -> Self {
        Self { config, opener }
    }

    /// The deep link for `event`, if the channel is configured.
    #[must_use]
    pub fn deep_link(&self, event: &NotifyEvent) -> Option<String> {
        let config = self.config.as_ref()?;
        let message = message_text(event);
        Some(format!(
            "https://wa.me/{}?text={}",
            config.admin_phone,
            urlencoding::encode(&message)
        ))
    }
}

impl NotificationChannel for WhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
        Box::pin(async move {
            let Some(config) = self.config.as_ref() else {
                return ChannelResult::not_configured(self.name());
            };
            let Some(url) = self.deep_link(event) else {
                return ChannelResult::not_configured(self.name());
            };

            // Deliberate UX pacing, not correctness: let the alert land
            // before a new tab steals focus.
            tokio::time::sleep(Duration::from_millis(config.open_delay_ms)).await;

            match self.opener.open(&url) {
                Ok(()) => {
                    debug!("whatsapp deep link opened");
                    ChannelResult::sent(self.name())
                }
                Err(reason) => ChannelResult::failed(self.name(), reason),
            }
        })
    }
}

/// WhatsApp-flavored message body (`*bold*` markup).
fn message_text(event: &NotifyEvent) -> String {
    match event {
        NotifyEvent::NewOrder(order) => format!(
            "🛍️ *New Order - WalkWay*\n\n\
             *Order ID:* {}\n\
             *Customer:* {}\n\
             *Email:* {}\n\
             *Phone:* {}\n\
             *Total:* {}\n\
             *Payment:* {}\n\n\
             *Items:*\n{}\n\n\
             *Address:*\n{}",
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
            "🎉 *New User Registration - WalkWay*\n\n\
             *Name:* {}\n\
             *Email:* {}\n\
             *Phone:* {}\n\
             *Date:* {}",
            user.full_name(),
            user.email,
            user.phone,
            user.joined_at.format("%d/%m/%Y"),
        ),
    }
}
