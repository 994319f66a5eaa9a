//! Login page view with an email/password form.

use dioxus::prelude::*;
use ui::auth::login;
use ui::{use_api, use_auth, use_toasts, Gate};

use super::RoleGate;
use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let client = use_api();
    let toasts = use_toasts();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            loading.set(true);
            match login(auth, &client, &e, &p).await {
                Ok(()) => {
                    toasts.success("Login successful!");
                    nav.replace(Route::Dashboard {});
                }
                Err(err) => {
                    tracing::warn!("login failed: {err}");
                    let message = err.user_message("Login failed");
                    toasts.error(message.clone());
                    error.set(Some(message));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        RoleGate {
            gate: Gate::PublicOnly,
            div {
                class: "auth-page",
                form {
                    class: "auth-card",
                    onsubmit: handle_login,

                    h1 { class: "auth-brand", "DAMAC" }
                    p { class: "muted", "Sign in to the admin dashboard" }

                    if let Some(message) = error() {
                        div { class: "auth-error", "{message}" }
                    }

                    label {
                        class: "form-field",
                        span { class: "form-label", "Email" }
                        input {
                            r#type: "email",
                            autocomplete: "username",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }
                    label {
                        class: "form-field",
                        span { class: "form-label", "Password" }
                        input {
                            r#type: "password",
                            autocomplete: "current-password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "btn btn-primary btn-block",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign In" }
                    }

                    p {
                        class: "auth-switch",
                        "No account yet? "
                        Link { to: Route::Register {}, "Create one" }
                    }
                }
            }
        }
    }
}
