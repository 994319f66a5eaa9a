//! Route access rules.
//!
//! [`Gate::evaluate`] decides what a route shows for the current
//! [`AuthState`]. The router wrapper that performs redirects lives in the
//! `web` crate next to the `Route` enum; the views it falls back to are here.

use dioxus::prelude::*;

use crate::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Any signed-in user.
    Authenticated,
    /// Only signed-out visitors (login page).
    PublicOnly,
    Admin,
    Agent,
    AdminOrAgent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Loading,
    Allow,
    Redirect(&'static str),
    Denied(&'static str),
}

impl Gate {
    pub fn evaluate(&self, auth: &AuthState) -> GateDecision {
        if auth.loading {
            return GateDecision::Loading;
        }

        let authenticated = auth.is_authenticated();
        if *self == Gate::PublicOnly {
            return if authenticated {
                GateDecision::Redirect(DASHBOARD_PATH)
            } else {
                GateDecision::Allow
            };
        }
        if !authenticated {
            return GateDecision::Redirect(LOGIN_PATH);
        }

        let (allowed, denial) = match self {
            Gate::Admin => (auth.is_admin(), "Admin access required to view this page."),
            Gate::Agent => (auth.is_agent(), "Agent access required to view this page."),
            Gate::AdminOrAgent => (
                auth.is_admin() || auth.is_agent(),
                "Admin or Agent access required to view this page.",
            ),
            Gate::Authenticated | Gate::PublicOnly => (true, ""),
        };

        if allowed {
            GateDecision::Allow
        } else {
            GateDecision::Denied(denial)
        }
    }
}

#[component]
pub fn GateLoading() -> Element {
    rsx! {
        div {
            class: "gate-loading",
            div { class: "spinner" }
            p { "Loading..." }
        }
    }
}

#[component]
pub fn AccessDenied(message: String) -> Element {
    rsx! {
        div {
            class: "access-denied",
            h2 { "Access Denied" }
            p { "{message}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use store::{AuthSnapshot, Role, UserProfile};

    use super::*;

    fn signed_in(role: Role) -> AuthState {
        AuthState {
            snapshot: AuthSnapshot {
                user: Some(UserProfile {
                    role,
                    ..Default::default()
                }),
                token: Some("t".to_string()),
                is_authenticated: true,
                profile_loaded: true,
            },
            loading: false,
        }
    }

    #[test]
    fn test_loading_wins() {
        let auth = AuthState {
            loading: true,
            ..Default::default()
        };
        for gate in [Gate::Authenticated, Gate::PublicOnly, Gate::Admin] {
            assert_eq!(gate.evaluate(&auth), GateDecision::Loading);
        }
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        let auth = AuthState::default();
        assert_eq!(Gate::Admin.evaluate(&auth), GateDecision::Redirect(LOGIN_PATH));
        assert_eq!(Gate::Authenticated.evaluate(&auth), GateDecision::Redirect(LOGIN_PATH));
        assert_eq!(Gate::PublicOnly.evaluate(&auth), GateDecision::Allow);
    }

    #[test]
    fn test_public_only_sends_users_to_dashboard() {
        assert_eq!(
            Gate::PublicOnly.evaluate(&signed_in(Role::User)),
            GateDecision::Redirect(DASHBOARD_PATH)
        );
    }

    #[test]
    fn test_roles() {
        let user = signed_in(Role::User);
        let agent = signed_in(Role::Agent);
        let admin = signed_in(Role::Admin);

        assert_eq!(
            Gate::Admin.evaluate(&user),
            GateDecision::Denied("Admin access required to view this page.")
        );
        assert!(matches!(Gate::Admin.evaluate(&agent), GateDecision::Denied(_)));
        assert_eq!(Gate::Admin.evaluate(&admin), GateDecision::Allow);

        assert_eq!(
            Gate::Agent.evaluate(&admin),
            GateDecision::Denied("Agent access required to view this page.")
        );
        assert_eq!(Gate::Agent.evaluate(&agent), GateDecision::Allow);

        assert_eq!(
            Gate::AdminOrAgent.evaluate(&user),
            GateDecision::Denied("Admin or Agent access required to view this page.")
        );
        assert_eq!(Gate::AdminOrAgent.evaluate(&agent), GateDecision::Allow);
        assert_eq!(Gate::Authenticated.evaluate(&user), GateDecision::Allow);
    }
}
