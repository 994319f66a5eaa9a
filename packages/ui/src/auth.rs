//! Authentication context and hooks for the UI.

use api::{ApiClient, ApiError};
use dioxus::prelude::*;
use store::{AuthSnapshot, Session, UserProfile};

use crate::context::use_api;
use crate::modal::ConfirmDialog;
use crate::toast::use_toasts;

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub snapshot: AuthSnapshot,
    /// A profile fetch for a stored token is in flight.
    pub loading: bool,
}

impl AuthState {
    fn from_session(session: &Session, loading: bool) -> Self {
        Self {
            snapshot: session.snapshot(),
            loading,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.snapshot.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.is_authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot.is_admin()
    }

    pub fn is_agent(&self) -> bool {
        self.snapshot.is_agent()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
///
/// Expects an [`ApiClient`] in context. Fetches the profile for a rehydrated
/// token and signs out whenever the client reports a 401.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_api();
    let session = client.session().clone();
    let mut auth_state =
        use_signal(|| AuthState::from_session(&session, session.needs_profile()));

    // Profile for a token restored from storage
    let profile_client = client.clone();
    let _ = use_resource(move || {
        let client = profile_client.clone();
        async move {
            let session = client.session();
            if !session.needs_profile() {
                return;
            }
            match api::auth::fetch_profile(&client).await {
                Ok(user) => {
                    tracing::info!("profile loaded for {}", user.display_name());
                    session.set_profile(user);
                }
                // The token stays; a 401 is handled by the listener below.
                Err(e) => tracing::warn!("failed to fetch profile: {e}"),
            }
            auth_state.set(AuthState::from_session(session, false));
        }
    });

    // Global unauthorized signal
    use_hook(move || {
        let mut events = client.unauthorized_events();
        let session = client.session().clone();
        spawn(async move {
            while let Some(event) = events.next().await {
                tracing::warn!("unauthorized response from {}, signing out", event.path);
                session.sign_out();
                auth_state.set(AuthState::from_session(&session, false));
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Sign in and publish the new state.
pub async fn login(
    mut auth: Signal<AuthState>,
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let result = api::auth::login(client, email, password).await?;
    client.session().sign_in(result.token, result.user);
    auth.set(AuthState::from_session(client.session(), false));
    Ok(())
}

/// Create an account, then sign in with the same credentials.
pub async fn register(
    auth: Signal<AuthState>,
    client: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let data = serde_json::json!({
        "username": username,
        "email": email,
        "password": password,
    });
    api::auth::register(client, data).await?;
    login(auth, client, email, password).await
}

/// Best-effort server logout, then clear the local session.
pub async fn logout(mut auth: Signal<AuthState>, client: &ApiClient) {
    if let Err(e) = api::auth::logout(client).await {
        tracing::warn!("logout request failed: {e}");
    }
    client.session().sign_out();
    auth.set(AuthState::from_session(client.session(), false));
}

/// Apply a profile edit locally and publish it.
pub fn update_user(mut auth: Signal<AuthState>, client: &ApiClient, edit: impl FnOnce(&mut UserProfile)) {
    client.session().update_user(edit);
    auth.set(AuthState::from_session(client.session(), false));
}

/// Button to log out the current user, after confirmation.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth_state = use_auth();
    let client = use_api();
    let toasts = use_toasts();
    let mut confirming = use_signal(|| false);

    let on_confirm = move |_| {
        let client = client.clone();
        confirming.set(false);
        spawn(async move {
            logout(auth_state, &client).await;
            toasts.success("Logged out successfully!");
        });
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| confirming.set(true),
            "{label}"
        }
        if confirming() {
            ConfirmDialog {
                title: "Log out",
                message: "Are you sure you want to log out?",
                confirm_label: "Logout",
                on_confirm,
                on_cancel: move |_| confirming.set(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use store::{MemoryStorage, Role};

    use super::*;

    #[test]
    fn test_state_mirrors_session() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        session.sign_in(
            "tok".to_string(),
            UserProfile {
                role: Role::Agent,
                ..Default::default()
            },
        );

        let state = AuthState::from_session(&session, false);
        assert!(state.is_authenticated());
        assert!(state.is_agent());
        assert!(!state.is_admin());
    }
}
