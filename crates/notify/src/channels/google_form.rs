//! Google Form submission channel.
//!
//! Submits a row to a Google Form's `formResponse` endpoint. Forms accept
//! plain form-encoded POSTs keyed by `entry.NNN` field ids, which makes a
//! form a zero-infrastructure order ledger the admin can open in Sheets.
//! Registrations carry no order fields, so they are skipped here.

use futures::future::BoxFuture;
use reqwest::Client;
use tracing::debug;

use super::{ChannelError, ChannelResult, NotificationChannel, into_result};
use crate::config::GoogleFormConfig;
use crate::event::NotifyEvent;

/// Posts order rows to a Google Form.
pub struct GoogleFormChannel {
    config: Option<GoogleFormConfig>,
    client: Client,
}

impl GoogleFormChannel {
    #[must_use]
    pub fn new(config: Option<GoogleFormConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn post(
        &self,
        config: &GoogleFormConfig,
        event: &NotifyEvent,
    ) -> Result<(), ChannelError> {
        let NotifyEvent::NewOrder(order) = event else {
            // Guarded by the Skipped arm in send.
            return Ok(());
        };

        let fields = [
            (config.order_id_entry.as_str(), order.order_id.to_string()),
            (config.name_entry.as_str(), order.customer.name.clone()),
            (
                config.email_entry.as_str(),
                order.customer.email.to_string(),
            ),
            (config.total_entry.as_str(), order.total.amount().to_string()),
        ];

        let response = self
            .client
            .post(&config.form_url)
            .form(&fields)
            .send()
            .await?;

        // Google answers form posts with redirects and opaque statuses;
        // anything that isn't a server error counts as accepted.
        if response.status().is_server_error() {
            return Err(ChannelError::Api {
                status: response.status().as_u16(),
                message: "form submission rejected".to_owned(),
            });
        }
        debug!("order row submitted to google form");
        Ok(())
    }
}

impl NotificationChannel for GoogleFormChannel {
    fn name(&self) -> &'static str {
        "google_form"
    }

    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
        Box::pin(async move {
            let Some(config) = self.config.as_ref() else {
                return ChannelResult::not_configured(self.name());
            };
            if !matches!(event, NotifyEvent::NewOrder(_)) {
                return ChannelResult::skipped(self.name());
            }
            into_result(self.name(), self.post(config, event).await)
        })
    }
}
