//! In-memory store adapter.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{StoreAdapter, StoreError};

/// An in-memory store for tests and ephemeral sessions.
///
/// Values are held as serialized JSON strings, the same representation the
/// durable adapters use, so corrupt-data handling is exercised identically.
///
/// The write failpoint exists for atomicity tests: flip the handle returned
/// by [`MemoryStore::write_failpoint`] and every subsequent write fails,
/// which is how "history write failed, cart must survive" is verified.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that makes all writes fail while set to `true`.
    #[must_use]
    pub fn write_failpoint(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.fail_writes)
    }

    fn check_writable(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Write {
                key: key.to_owned(),
                reason: "write failpoint enabled".to_owned(),
            });
        }
        Ok(())
    }
}

impl StoreAdapter for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove_raw(&mut self, key: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries.remove(key);
        Ok(())
    }
}
