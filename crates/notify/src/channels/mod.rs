//! The channel contract and every concrete notification channel.
//!
//! A channel is one transport the admin can be reached on. Channels are
//! best-effort: `send` never panics and never returns `Err` - every outcome,
//! including "this channel was never set up", comes back as a
//! [`ChannelResult`] so the fan-out can keep going regardless.

mod alert;
mod discord;
mod email;
mod google_form;
mod local_log;
mod telegram;
mod whatsapp;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::event::NotifyEvent;

pub use alert::{AlertChannel, AlertSink, TracingAlertSink};
pub use discord::DiscordChannel;
pub use email::EmailChannel;
pub use google_form::GoogleFormChannel;
pub use local_log::LocalLogChannel;
pub use telegram::TelegramChannel;
pub use whatsapp::{LinkOpener, TracingLinkOpener, WhatsAppChannel};

/// How one channel's send attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelStatus {
    /// Delivered (or handed off) successfully.
    Sent,
    /// The channel's settings are missing or placeholders; no attempt made.
    NotConfigured,
    /// The event does not apply to this channel (e.g. a registration on an
    /// order-only form); nothing to do.
    Skipped,
    /// The attempt failed. Logged, never propagated.
    Failed(String),
}

/// One channel's outcome within a fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResult {
    /// Channel name, stable for logs and dashboards.
    pub channel: &'static str,
    pub status: ChannelStatus,
}

impl ChannelResult {
    #[must_use]
    pub const fn sent(channel: &'static str) -> Self {
        Self {
            channel,
            status: ChannelStatus::Sent,
        }
    }

    #[must_use]
    pub const fn not_configured(channel: &'static str) -> Self {
        Self {
            channel,
            status: ChannelStatus::NotConfigured,
        }
    }

    #[must_use]
    pub const fn skipped(channel: &'static str) -> Self {
        Self {
            channel,
            status: ChannelStatus::Skipped,
        }
    }

    #[must_use]
    pub const fn failed(channel: &'static str, reason: String) -> Self {
        Self {
            channel,
            status: ChannelStatus::Failed(reason),
        }
    }

    /// Whether this attempt actually delivered.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, ChannelStatus::Sent)
    }
}

/// Errors inside a channel's send attempt.
///
/// These never cross the channel boundary as `Err`; they are folded into
/// [`ChannelStatus::Failed`] so one channel's outage cannot abort the
/// fan-out.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with an error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Anything else (message building, transport setup).
    #[error("{0}")]
    Other(String),
}

/// One notification transport.
pub trait NotificationChannel: Send + Sync {
    /// Stable channel name (`"discord"`, `"local_log"`, ...).
    fn name(&self) -> &'static str;

    /// Deliver `event`, best-effort.
    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult>;
}

/// Fold a channel-internal result into a [`ChannelResult`], logging failures.
pub(crate) fn into_result(
    channel: &'static str,
    outcome: Result<(), ChannelError>,
) -> ChannelResult {
    match outcome {
        Ok(()) => ChannelResult::sent(channel),
        Err(error) => {
            tracing::warn!(channel, %error, "notification channel failed");
            ChannelResult::failed(channel, error.to_string())
        }
    }
}

/// Shared status check for webhook-style POSTs.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<(), ChannelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response.text().await.unwrap_or_default();
    Err(ChannelError::Api {
        status: status.as_u16(),
        message,
    })
}
