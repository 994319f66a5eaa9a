//! # Auth session store
//!
//! [`Session`] is the central holder of the bearer token and the signed-in
//! [`UserProfile`]. It is a cheap `Clone` handle (shared `Arc<Mutex<_>>`) so the
//! HTTP client and the UI can observe the same state:
//!
//! - the HTTP client reads [`Session::token`] on every request and calls
//!   [`Session::invalidate`] on a 401;
//! - the UI drives the lifecycle with [`Session::sign_in`],
//!   [`Session::set_profile`], [`Session::update_user`] and
//!   [`Session::sign_out`], and mirrors [`Session::snapshot`] into a signal.
//!
//! Every mutation writes the snapshot to storage under
//! [`crate::persist::AUTH_KEY`] and keeps the raw token under
//! [`crate::persist::TOKEN_KEY`], so a reload rehydrates the same session.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::models::UserProfile;
use crate::persist::{self, AUTH_KEY, TOKEN_KEY};
use crate::storage::{lock, KeyValueStore};

/// Serializable auth state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSnapshot {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub profile_loaded: bool,
}

impl AuthSnapshot {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }

    pub fn is_agent(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_agent)
    }
}

/// Shared handle to the auth session.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<AuthSnapshot>>,
    storage: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Empty session over the given storage. Nothing is read from storage.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AuthSnapshot::default())),
            storage,
        }
    }

    /// Restore the session persisted by a previous page load.
    ///
    /// A bare token without a snapshot is adopted as authenticated with the
    /// profile still to be fetched.
    pub fn rehydrate(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut snapshot: AuthSnapshot =
            persist::load(storage.as_ref(), AUTH_KEY).unwrap_or_default();
        let stored_token = storage.get(TOKEN_KEY);

        match (&snapshot.token, stored_token) {
            (None, Some(token)) => {
                snapshot.token = Some(token);
                snapshot.is_authenticated = true;
            }
            // Token was removed out-of-band (e.g. a 401 in another tab).
            (Some(_), None) => snapshot = AuthSnapshot::default(),
            _ => {}
        }

        tracing::debug!(
            authenticated = snapshot.is_authenticated,
            "session rehydrated"
        );

        Self {
            state: Arc::new(Mutex::new(snapshot)),
            storage,
        }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        lock(&self.state).clone()
    }

    /// Bearer token from the central state, falling back to persisted storage.
    pub fn token(&self) -> Option<String> {
        let token = lock(&self.state).token.clone();
        token.or_else(|| self.storage.get(TOKEN_KEY))
    }

    /// Whether a profile fetch is needed: a token is present but no user has
    /// been loaded for it yet.
    pub fn needs_profile(&self) -> bool {
        let state = lock(&self.state);
        state.token.is_some() && state.user.is_none() && !state.profile_loaded
    }

    /// Record a successful login.
    pub fn sign_in(&self, token: String, user: UserProfile) {
        self.storage.set(TOKEN_KEY, &token);
        self.mutate(|state| {
            state.user = Some(user);
            state.token = Some(token);
            state.is_authenticated = true;
            state.profile_loaded = true;
        });
        tracing::info!("signed in");
    }

    /// Record a fetched profile for the current token.
    pub fn set_profile(&self, user: UserProfile) {
        self.mutate(|state| {
            state.user = Some(user);
            state.is_authenticated = true;
            state.profile_loaded = true;
        });
    }

    /// Apply a partial edit to the current user (profile page).
    pub fn update_user(&self, edit: impl FnOnce(&mut UserProfile)) {
        self.mutate(|state| {
            let mut user = state.user.take().unwrap_or_default();
            edit(&mut user);
            state.user = Some(user);
        });
    }

    /// Clear the whole session and the persisted token.
    pub fn sign_out(&self) {
        self.storage.remove(TOKEN_KEY);
        self.mutate(|state| *state = AuthSnapshot::default());
        tracing::info!("signed out");
    }

    /// Drop the credentials after the backend rejected them.
    ///
    /// Only the token is cleared here; the shell follows up with
    /// [`Session::sign_out`] once it has reacted to the unauthorized signal.
    pub fn invalidate(&self) {
        self.storage.remove(TOKEN_KEY);
        self.mutate(|state| {
            state.token = None;
            state.is_authenticated = false;
        });
        tracing::warn!("session token invalidated");
    }

    fn mutate(&self, f: impl FnOnce(&mut AuthSnapshot)) {
        let snapshot = {
            let mut state = lock(&self.state);
            f(&mut state);
            state.clone()
        };
        persist::save(self.storage.as_ref(), AUTH_KEY, &snapshot);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::MemoryStorage;

    fn agent() -> UserProfile {
        UserProfile {
            email: "agent@example.com".to_string(),
            role: Role::Agent,
            ..Default::default()
        }
    }

    #[test]
    fn test_sign_in_persists_token_and_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());

        session.sign_in("tok-1".to_string(), agent());

        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert!(session.snapshot().is_agent());
        assert!(!session.needs_profile());

        let restored = Session::rehydrate(storage);
        assert_eq!(restored.snapshot(), session.snapshot());
    }

    #[test]
    fn test_rehydrate_adopts_bare_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "legacy");

        let session = Session::rehydrate(storage);
        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        assert!(session.needs_profile());
    }

    #[test]
    fn test_rehydrate_drops_snapshot_without_token() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());
        session.sign_in("tok".to_string(), agent());
        storage.remove(TOKEN_KEY);

        let restored = Session::rehydrate(storage);
        assert_eq!(restored.snapshot(), AuthSnapshot::default());
    }

    #[test]
    fn test_token_falls_back_to_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());
        assert!(session.token().is_none());

        storage.set(TOKEN_KEY, "from-storage");
        assert_eq!(session.token().as_deref(), Some("from-storage"));
    }

    #[test]
    fn test_invalidate_clears_both_token_sources() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());
        session.sign_in("tok".to_string(), agent());

        session.invalidate();

        assert!(session.token().is_none());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(!session.snapshot().is_authenticated);
    }

    #[test]
    fn test_sign_out_resets_everything() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());
        session.sign_in("tok".to_string(), agent());

        session.sign_out();

        assert_eq!(session.snapshot(), AuthSnapshot::default());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_update_user_merges() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage);
        session.sign_in("tok".to_string(), agent());

        session.update_user(|user| user.phone = Some("+971 50 000 0000".to_string()));

        let user = session.snapshot().user.unwrap();
        assert_eq!(user.email, "agent@example.com");
        assert_eq!(user.phone.as_deref(), Some("+971 50 000 0000"));
    }
}
