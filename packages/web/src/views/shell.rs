//! Signed-in layout and the route gates.

use dioxus::prelude::*;
use ui::guard::{DASHBOARD_PATH, LOGIN_PATH};
use ui::views::{AgentDashboardPage, DashboardPage, PublicSite};
use ui::{nav_for, use_auth, AccessDenied, AppSidebar, Gate, GateDecision, GateLoading};

use crate::Route;

/// Renders `children` when `gate` lets the current user in.
#[component]
pub fn RoleGate(gate: Gate, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let decision = gate.evaluate(&auth.read());
    match decision {
        GateDecision::Loading => rsx! { GateLoading {} },
        GateDecision::Allow => rsx! { {children} },
        GateDecision::Denied(message) => rsx! {
            AccessDenied { message: message.to_string() }
        },
        GateDecision::Redirect(path) => {
            match path.parse::<Route>() {
                Ok(route) => {
                    nav.replace(route);
                }
                Err(_) => tracing::warn!("no route for redirect to {path}"),
            }
            rsx! {}
        }
    }
}

/// Sidebar plus the routed page, for any signed-in user.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = auth.read().clone();
    let groups = nav_for(&state);
    let user = state.user().cloned();

    let on_navigate = move |path: &'static str| match path.parse::<Route>() {
        Ok(route) => {
            nav.push(route);
        }
        Err(_) => tracing::warn!("sidebar entry {path} has no route"),
    };

    rsx! {
        RoleGate {
            gate: Gate::Authenticated,
            div {
                class: "app-shell",
                AppSidebar {
                    groups,
                    active_path: route.to_string(),
                    user,
                    on_navigate,
                }
                main {
                    class: "app-main",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
pub fn AdminArea() -> Element {
    rsx! {
        RoleGate { gate: Gate::Admin, Outlet::<Route> {} }
    }
}

#[component]
pub fn AgentArea() -> Element {
    rsx! {
        RoleGate { gate: Gate::Agent, Outlet::<Route> {} }
    }
}

/// Admins get the sales overview, agents their own workspace.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let (admin, agent) = {
        let state = auth.read();
        (state.is_admin(), state.is_agent())
    };

    rsx! {
        RoleGate {
            gate: Gate::AdminOrAgent,
            if admin {
                DashboardPage {}
            } else if agent {
                AgentDashboardPage {}
            }
        }
    }
}

/// The public website, reachable without signing in.
#[component]
pub fn Site() -> Element {
    let route = use_route::<Route>();
    rsx! {
        PublicSite { page: route.to_string() }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let auth = use_auth();
    let target = if auth.read().is_authenticated() {
        DASHBOARD_PATH
    } else {
        LOGIN_PATH
    };
    let path = segments.join("/");

    rsx! {
        div {
            class: "access-denied",
            h2 { "Page not found" }
            p { class: "muted", "Nothing lives at /{path}." }
            Link { class: "btn btn-primary", to: target, "Go back" }
        }
    }
}
