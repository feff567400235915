//! The fan-out dispatcher.
//!
//! One event goes to every channel; channels cannot see or affect each
//! other. The alert and the durable local log run first, in order, so the
//! admin has an on-screen and an on-disk record before any network is
//! touched. The network channels then run concurrently and may complete in
//! any order.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, instrument};

use walkway_engine::NotificationLog;

use crate::channels::{
    AlertChannel, AlertSink, ChannelResult, DiscordChannel, EmailChannel, GoogleFormChannel,
    LinkOpener, LocalLogChannel, NotificationChannel, TelegramChannel, TracingAlertSink,
    TracingLinkOpener, WhatsAppChannel,
};
use crate::config::NotifyConfig;
use crate::event::NotifyEvent;

/// The aggregate outcome of one fan-out.
#[derive(Debug, Clone)]
pub struct FanoutReport {
    /// Whether at least one channel actually delivered.
    pub any_succeeded: bool,
    /// Every channel's individual outcome, front channels first.
    pub results: Vec<ChannelResult>,
}

impl FanoutReport {
    fn from_results(results: Vec<ChannelResult>) -> Self {
        Self {
            any_succeeded: results.iter().any(ChannelResult::is_success),
            results,
        }
    }

    /// Number of channels that delivered.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }
}

/// Dispatches events to the configured channel set.
pub struct Notifier {
    /// Run sequentially, before any network: alert, then local log.
    front: Vec<Box<dyn NotificationChannel>>,
    /// Run concurrently; completion order is unspecified.
    network: Vec<Box<dyn NotificationChannel>>,
}

impl Notifier {
    /// The standard channel set with default (logging) alert sink and link
    /// opener.
    #[must_use]
    pub fn new(log: NotificationLog, config: NotifyConfig) -> Self {
        Self::with_surface(
            log,
            config,
            Arc::new(TracingAlertSink),
            Arc::new(TracingLinkOpener),
        )
    }

    /// The standard channel set with the embedding surface's alert sink and
    /// link opener.
    #[must_use]
    pub fn with_surface(
        log: NotificationLog,
        config: NotifyConfig,
        alert_sink: Arc<dyn AlertSink>,
        link_opener: Arc<dyn LinkOpener>,
    ) -> Self {
        Self {
            front: vec![
                Box::new(AlertChannel::new(alert_sink)),
                Box::new(LocalLogChannel::new(log)),
            ],
            network: vec![
                Box::new(WhatsAppChannel::new(config.whatsapp, link_opener)),
                Box::new(DiscordChannel::new(config.discord)),
                Box::new(TelegramChannel::new(config.telegram)),
                Box::new(GoogleFormChannel::new(config.google_form)),
                Box::new(EmailChannel::new(config.email)),
            ],
        }
    }

    /// A notifier over an explicit channel split, for tests and embedders
    /// with custom transports.
    #[must_use]
    pub fn from_channels(
        front: Vec<Box<dyn NotificationChannel>>,
        network: Vec<Box<dyn NotificationChannel>>,
    ) -> Self {
        Self { front, network }
    }

    /// Send `event` everywhere, best-effort.
    ///
    /// Never fails: every channel outcome, including failures, is collected
    /// into the report. Callers own what to do about `any_succeeded ==
    /// false` (with the standard set, the local log makes that effectively
    /// unreachable).
    #[instrument(skip(self, event), fields(kind = ?event.kind()))]
    pub async fn dispatch(&self, event: &NotifyEvent) -> FanoutReport {
        let mut results = Vec::with_capacity(self.front.len() + self.network.len());

        for channel in &self.front {
            results.push(channel.send(event).await);
        }

        let network = join_all(self.network.iter().map(|channel| channel.send(event))).await;
        results.extend(network);

        let report = FanoutReport::from_results(results);
        info!(
            delivered = report.success_count(),
            attempted = report.results.len(),
            "notification fan-out complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::ChannelStatus;
    use crate::event::testing::sample_order;
    use futures::future::BoxFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubChannel {
        name: &'static str,
        status: ChannelStatus,
        calls: Arc<AtomicUsize>,
    }

    impl StubChannel {
        fn boxed(
            name: &'static str,
            status: ChannelStatus,
            calls: &Arc<AtomicUsize>,
        ) -> Box<dyn NotificationChannel> {
            Box::new(Self {
                name,
                status,
                calls: Arc::clone(calls),
            })
        }
    }

    impl NotificationChannel for StubChannel {
        fn name(&self) -> &'static str {
            self.name
        }

        fn send<'a>(&'a self, _event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                ChannelResult {
                    channel: self.name,
                    status: self.status.clone(),
                }
            })
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_channels() {
        let calls = Arc::new(AtomicUsize::new(0));
        let notifier = Notifier::from_channels(
            vec![StubChannel::boxed("alert", ChannelStatus::Sent, &calls)],
            vec![
                StubChannel::boxed(
                    "broken",
                    ChannelStatus::Failed("boom".to_owned()),
                    &calls,
                ),
                StubChannel::boxed("discord", ChannelStatus::Sent, &calls),
                StubChannel::boxed("telegram", ChannelStatus::Sent, &calls),
            ],
        );

        let report = notifier
            .dispatch(&NotifyEvent::NewOrder(sample_order()))
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4, "every channel must run");
        assert!(report.any_succeeded);
        assert_eq!(report.success_count(), 3);
        assert_eq!(report.results.len(), 4);
    }

    #[tokio::test]
    async fn test_all_failures_reported() {
        let calls = Arc::new(AtomicUsize::new(0));
        let notifier = Notifier::from_channels(
            Vec::new(),
            vec![
                StubChannel::boxed("a", ChannelStatus::Failed("x".to_owned()), &calls),
                StubChannel::boxed("b", ChannelStatus::NotConfigured, &calls),
            ],
        );

        let report = notifier
            .dispatch(&NotifyEvent::NewOrder(sample_order()))
            .await;

        assert!(!report.any_succeeded);
        assert_eq!(report.success_count(), 0);
        assert_eq!(report.results.len(), 2);
    }

    #[tokio::test]
    async fn test_standard_set_without_config_still_delivers_locally() {
        // With nothing configured, the alert and the local log still land,
        // every network channel reports not_configured, and the aggregate
        // is a success.
        let log = NotificationLog::new(walkway_engine::Store::new(
            walkway_engine::MemoryStore::new(),
        ));
        let notifier = Notifier::new(log.clone(), NotifyConfig::default());

        let report = notifier
            .dispatch(&NotifyEvent::NewOrder(sample_order()))
            .await;

        assert!(report.any_succeeded);
        assert_eq!(report.success_count(), 2);
        assert_eq!(log.entries().len(), 1);
        assert!(
            report
                .results
                .iter()
                .filter(|r| r.status == ChannelStatus::NotConfigured)
                .count()
                >= 4
        );
    }

    #[tokio::test]
    async fn test_front_channels_run_before_network() {
        // The local-log stand-in records its position; it must be called
        // before any network channel.
        struct OrderProbe {
            name: &'static str,
            sequence: Arc<std::sync::Mutex<Vec<&'static str>>>,
        }

        impl NotificationChannel for OrderProbe {
            fn name(&self) -> &'static str {
                self.name
            }

            fn send<'a>(&'a self, _event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
                Box::pin(async move {
                    self.sequence.lock().expect("probe lock").push(self.name);
                    ChannelResult::sent(self.name)
                })
            }
        }

        let sequence = Arc::new(std::sync::Mutex::new(Vec::new()));
        let notifier = Notifier::from_channels(
            vec![Box::new(OrderProbe {
                name: "local_log",
                sequence: Arc::clone(&sequence),
            })],
            vec![Box::new(OrderProbe {
                name: "discord",
                sequence: Arc::clone(&sequence),
            })],
        );

        notifier
            .dispatch(&NotifyEvent::NewOrder(sample_order()))
            .await;

        let seen = sequence.lock().expect("probe lock");
        assert_eq!(*seen, vec!["local_log", "discord"]);
    }
}
