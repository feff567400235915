//! File-backed store adapter.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::warn;

use super::{StoreAdapter, StoreError};

/// A durable store keeping one `<key>.json` file per logical key.
///
/// `set_raw` writes through a temp file and renames it into place, so a
/// crash mid-write leaves the previous value rather than a torn file.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a file store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the root directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::Write {
            key: root.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        // Keys double as file names; reject anything that could escape the
        // root or confuse the filesystem.
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
            && !key.contains("..");
        if !safe {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl StoreAdapter for JsonFileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value, treating as absent");
                None
            }
        }
    }

    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let write_err = |e: io::Error| StoreError::Write {
            key: key.to_owned(),
            reason: e.to_string(),
        };

        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)
    }

    fn remove_raw(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write {
                key: key.to_owned(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.set_raw("cart-items", "[1,2,3]".to_owned()).unwrap();
        drop(store);

        // A fresh handle over the same directory sees the same data, the
        // file-store equivalent of a page reload.
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.get_raw("cart-items").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.get_raw("order-history"), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.set_raw("logged-in-flag", "true".to_owned()).unwrap();
        store.remove_raw("logged-in-flag").unwrap();
        store.remove_raw("logged-in-flag").unwrap();
        assert_eq!(store.get_raw("logged-in-flag"), None);
    }

    #[test]
    fn test_colon_keys_are_valid() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let key = "password-reset-token:abc123";
        store.set_raw(key, "{}".to_owned()).unwrap();
        assert_eq!(store.get_raw(key).as_deref(), Some("{}"));
    }

    #[test]
    fn test_unsafe_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", "a\\b"] {
            assert!(
                matches!(
                    store.set_raw(key, "{}".to_owned()),
                    Err(StoreError::InvalidKey(_))
                ),
                "expected rejection for {key:?}"
            );
        }
    }
}
