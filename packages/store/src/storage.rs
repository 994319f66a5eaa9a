//! # Key-value storage abstraction
//!
//! The dashboard persists a handful of small string values: the bearer token,
//! serialized snapshots of the auth and CMS state, and traffic-tracking
//! markers. [`KeyValueStore`] is the seam between that logic and the concrete
//! backend:
//!
//! | Implementation | Platform |
//! |----------------|----------|
//! | [`crate::MemoryStorage`] | native targets and tests |
//! | `LocalStorage` | browser (`wasm32` + `web` feature), backed by `window.localStorage` |
//!
//! Reads return `None` and writes are best-effort: a broken or full storage
//! degrades to "nothing persisted" instead of failing the UI.

use std::sync::{Mutex, MutexGuard};

/// Synchronous string key-value storage, modelled on `window.localStorage`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
