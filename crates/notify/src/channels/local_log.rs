//! Durable local notification log channel.

use futures::future::BoxFuture;

use walkway_engine::{AdminNotification, NotificationLog};

use super::{ChannelResult, NotificationChannel};
use crate::event::NotifyEvent;

/// Records the event in the engine's admin notification ring buffer.
///
/// This is the guaranteed fallback: a synchronous durable write with no
/// network in the way. The fan-out runs it before any webhook so the event
/// is on record even if the session dies mid-dispatch.
pub struct LocalLogChannel {
    log: NotificationLog,
}

impl LocalLogChannel {
    #[must_use]
    pub const fn new(log: NotificationLog) -> Self {
        Self { log }
    }
}

impl NotificationChannel for LocalLogChannel {
    fn name(&self) -> &'static str {
        "local_log"
    }

    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
        Box::pin(async move {
            let notification = AdminNotification::new(
                event.kind(),
                match event {
                    NotifyEvent::NewOrder(_) => "New Order Received",
                    NotifyEvent::NewRegistration(_) => "New User Registration",
                },
                event.log_message(),
                event.payload(),
            );

            match self.log.record(notification) {
                Ok(()) => ChannelResult::sent(self.name()),
                Err(e) => ChannelResult::failed(self.name(), e.to_string()),
            }
        })
    }
}
