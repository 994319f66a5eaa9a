//! # Browser localStorage backend
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the **web platform**. It
//! writes straight through to `window.localStorage`, which is where the
//! session token and the persisted state snapshots live between page loads.
//!
//! The struct is zero-sized: the `Storage` handle is looked up on every call
//! because `web_sys` handles are neither `Send` nor `Sync`.
//!
//! All errors (storage disabled, quota exceeded, private mode) are logged and
//! swallowed, matching the best-effort contract of the trait.

use crate::storage::KeyValueStore;

/// `window.localStorage`-backed store.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable; dropping write to {key}");
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("localStorage rejected write to {key}");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
