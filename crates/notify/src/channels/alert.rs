//! Desktop/browser alert channel.

use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::info;

use super::{ChannelResult, NotificationChannel};
use crate::event::NotifyEvent;

/// Where alert title/body pairs go.
///
/// The engine is headless; the embedding surface (a webview shell, a tray
/// applet) supplies the sink that actually pops the notification. The
/// default [`TracingAlertSink`] just logs.
pub trait AlertSink: Send + Sync {
    fn alert(&self, title: &str, body: &str);
}

/// Default sink: emit the alert as a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn alert(&self, title: &str, body: &str) {
        info!(title, body, "alert");
    }
}

/// Instant on-screen alert. Always succeeds: the sink has no failure mode
/// the engine can observe.
pub struct AlertChannel {
    sink: Arc<dyn AlertSink>,
}

impl AlertChannel {
    #[must_use]
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self { sink }
    }
}

impl Default for AlertChannel {
    fn default() -> Self {
        Self::new(Arc::new(TracingAlertSink))
    }
}

impl NotificationChannel for AlertChannel {
    fn name(&self) -> &'static str {
        "alert"
    }

    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
        Box::pin(async move {
            self.sink.alert(event.title(), &event.summary());
            ChannelResult::sent(self.name())
        })
    }
}
