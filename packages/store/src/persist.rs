//! Storage keys and JSON snapshot helpers shared by the session and CMS state.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::KeyValueStore;

/// Raw bearer token, read by the HTTP client as a fallback.
pub const TOKEN_KEY: &str = "token";
/// Serialized [`crate::AuthSnapshot`].
pub const AUTH_KEY: &str = "persist:auth";
/// Serialized [`crate::CmsSettings`].
pub const CMS_KEY: &str = "persist:cmsSettings";

/// Load and deserialize a JSON snapshot. Corrupt snapshots are discarded.
pub fn load<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("discarding corrupt snapshot {key}: {e}");
            storage.remove(key);
            None
        }
    }
}

/// Serialize and store a JSON snapshot.
pub fn save<T: Serialize>(storage: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => tracing::error!("failed to serialize snapshot {key}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_corrupt_snapshot_is_removed() {
        let storage = MemoryStorage::new();
        storage.set(AUTH_KEY, "{not json");
        let loaded: Option<serde_json::Value> = load(&storage, AUTH_KEY);
        assert!(loaded.is_none());
        assert!(storage.get(AUTH_KEY).is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        save(&storage, CMS_KEY, &vec![1, 2, 3]);
        let loaded: Option<Vec<u8>> = load(&storage, CMS_KEY);
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
