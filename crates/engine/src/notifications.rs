//! Admin notification log.
//!
//! A durable ring buffer of admin-facing events (new orders, new
//! registrations), newest first, capped at 100 entries. This is the
//! guaranteed-delivery channel behind the best-effort network fan-out: the
//! entry is written synchronously before any webhook is attempted, so the
//! admin dashboard always has a record even if every external channel fails
//! or the page is closed mid-dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::store::{Store, StoreError, keys};

/// Maximum number of retained notifications; oldest are dropped.
pub const CAPACITY: usize = 100;

/// What kind of event a notification records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewOrder,
    NewRegistration,
}

/// One admin notification.
///
/// Only the `read` flag is ever mutated after creation, and only via
/// [`NotificationLog::mark_read`] (the dashboard's single write).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// The full event (order or registration) for the dashboard detail view.
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl AdminNotification {
    /// Create an unread notification stamped now.
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            kind,
            title: title.into(),
            message: message.into(),
            payload,
            timestamp: Utc::now(),
            read: false,
        }
    }
}

/// Durable ring buffer over the `admin-notification-log` store key.
///
/// Every mutation also recomputes the persisted unread count, which the
/// dashboard badge reads directly.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    store: Store,
}

impl NotificationLog {
    /// Create a log over the given store.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Prepend a notification, dropping the oldest beyond [`CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    #[instrument(skip(self, notification), fields(kind = ?notification.kind))]
    pub fn record(&self, notification: AdminNotification) -> Result<(), StoreError> {
        let mut entries = self.entries();
        entries.insert(0, notification);
        entries.truncate(CAPACITY);
        self.persist(&entries)
    }

    /// All retained notifications, newest first.
    #[must_use]
    pub fn entries(&self) -> Vec<AdminNotification> {
        self.store.get(keys::ADMIN_NOTIFICATIONS).unwrap_or_default()
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> u32 {
        self.store.get(keys::UNREAD_NOTIFICATIONS).unwrap_or(0)
    }

    /// Mark one notification read. Returns `false` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn mark_read(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries();
        let Some(entry) = entries.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        entry.read = true;
        self.persist(&entries)?;
        Ok(true)
    }

    fn persist(&self, entries: &[AdminNotification]) -> Result<(), StoreError> {
        self.store.set(keys::ADMIN_NOTIFICATIONS, &entries)?;
        let unread =
            u32::try_from(entries.iter().filter(|n| !n.read).count()).unwrap_or(u32::MAX);
        self.store.set(keys::UNREAD_NOTIFICATIONS, &unread)
    }
}
