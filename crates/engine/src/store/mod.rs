//! Durable local key-value store adapter.
//!
//! Every piece of engine state lives under a named key as a JSON value.
//! Writes are synchronous and immediately durable; reads of missing or
//! corrupt data yield "absent", never an error. There is no transaction
//! across keys.
//!
//! Known limitation: each mutation is a full read-modify-write of one key
//! with no cross-process locking, so two concurrent sessions writing the
//! same key are last-writer-wins.

mod file;
mod memory;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Well-known store keys.
///
/// These names are a compatibility surface: the admin dashboard and any
/// pre-existing persisted state address the same keys.
pub mod keys {
    /// Cart line items, `Vec<LineItem>`.
    pub const CART_ITEMS: &str = "cart-items";
    /// Wishlist items, `Vec<WishlistItem>`.
    pub const WISHLIST_ITEMS: &str = "wishlist-items";
    /// Append-only order history, `Vec<Order>`.
    pub const ORDER_HISTORY: &str = "order-history";
    /// Admin notification ring buffer, newest first.
    pub const ADMIN_NOTIFICATIONS: &str = "admin-notification-log";
    /// Count of unread admin notifications.
    pub const UNREAD_NOTIFICATIONS: &str = "unread-notification-count";
    /// Whether a user is logged in, `bool`.
    pub const LOGGED_IN_FLAG: &str = "logged-in-flag";
    /// The logged-in user's profile.
    pub const LOGGED_IN_USER: &str = "logged-in-user";

    /// Key for a single password-reset token.
    #[must_use]
    pub fn reset_token(token: &str) -> String {
        format!("password-reset-token:{token}")
    }
}

/// Errors that can occur when writing to the store.
///
/// Reads do not produce errors: missing and malformed values are both
/// reported as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Value could not be serialized to JSON.
    #[error("failed to serialize value for key {key}: {reason}")]
    Serialize { key: String, reason: String },

    /// The backing store rejected the write.
    #[error("failed to write key {key}: {reason}")]
    Write { key: String, reason: String },

    /// The key contains characters the backing store cannot represent.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// A raw string-valued key-value store.
///
/// Implementations must make `set_raw` durable before returning. Typed
/// access goes through [`Store`], which layers JSON (de)serialization and
/// the corrupt-data-is-absent policy on top.
pub trait StoreAdapter {
    /// Read the raw value for `key`, if present.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Durably write the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write cannot be made durable.
    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be made durable.
    fn remove_raw(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Shared handle to a store adapter with typed JSON access.
///
/// Cheaply cloneable; every component holding a clone sees the same
/// underlying state. This is how the ledgers, checkout, and notification
/// log are wired to one session's storage without ambient globals.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<Box<dyn StoreAdapter + Send>>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Wrap a store adapter in a shared handle.
    pub fn new(adapter: impl StoreAdapter + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(adapter))),
        }
    }

    /// Read and deserialize the value for `key`.
    ///
    /// Missing keys and malformed stored JSON both return `None`; corruption
    /// is logged and treated as absent rather than surfaced.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.lock().get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key, %error, "discarding corrupt stored value");
                None
            }
        }
    }

    /// Serialize and durably write the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the underlying write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
            key: key.to_owned(),
            reason: e.to_string(),
        })?;
        self.lock().set_raw(key, raw)
    }

    /// Remove the value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be made durable.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove_raw(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Box<dyn StoreAdapter + Send>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let store = Store::new(MemoryStore::new());
        assert_eq!(store.get::<Vec<String>>("cart-items"), None);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let store = Store::new(MemoryStore::new());
        store.set("cart-items", &vec!["a", "b"]).unwrap();
        assert_eq!(
            store.get::<Vec<String>>("cart-items"),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
    }

    #[test]
    fn test_corrupt_value_is_absent() {
        let mut adapter = MemoryStore::new();
        adapter
            .set_raw("cart-items", "{not json".to_owned())
            .unwrap();
        let store = Store::new(adapter);
        assert_eq!(store.get::<Vec<String>>("cart-items"), None);
    }

    #[test]
    fn test_wrong_shape_is_absent() {
        let store = Store::new(MemoryStore::new());
        store.set("cart-items", &42).unwrap();
        assert_eq!(store.get::<Vec<String>>("cart-items"), None);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = Store::new(MemoryStore::new());
        store.remove("cart-items").unwrap();
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new(MemoryStore::new());
        let other = store.clone();
        store.set("logged-in-flag", &true).unwrap();
        assert_eq!(other.get::<bool>("logged-in-flag"), Some(true));
    }
}
