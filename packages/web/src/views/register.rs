//! Registration page view with email/password form.

use dioxus::prelude::*;
use ui::auth::register;
use ui::{use_api, use_auth, use_toasts, Gate};

use super::RoleGate;
use crate::Route;

/// First problem with the registration form, if any.
fn check(username: &str, email: &str, password: &str, confirm: &str) -> Option<&'static str> {
    if username.is_empty() {
        Some("Username is required")
    } else if email.is_empty() || !email.contains('@') {
        Some("Please enter a valid email")
    } else if password.len() < 8 {
        Some("Password must be at least 8 characters")
    } else if password != confirm {
        Some("Passwords do not match")
    } else {
        None
    }
}

/// Register page component.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let client = use_api();
    let toasts = use_toasts();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let u = username().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            if let Some(problem) = check(&u, &e, &p, &confirm_password()) {
                error.set(Some(problem.to_string()));
                return;
            }

            loading.set(true);
            match register(auth, &client, &u, &e, &p).await {
                Ok(()) => {
                    toasts.success("Registration successful!");
                    nav.replace(Route::Dashboard {});
                }
                Err(err) => {
                    tracing::warn!("registration failed: {err}");
                    let message = err.user_message("Registration failed");
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
                    onsubmit: handle_register,

                    h1 { class: "auth-brand", "DAMAC" }
                    p { class: "muted", "Create your account" }

                    if let Some(message) = error() {
                        div { class: "auth-error", "{message}" }
                    }

                    label {
                        class: "form-field",
                        span { class: "form-label", "Username" }
                        input {
                            value: "{username}",
                            oninput: move |evt| username.set(evt.value()),
                        }
                    }
                    label {
                        class: "form-field",
                        span { class: "form-label", "Email" }
                        input {
                            r#type: "email",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }
                    label {
                        class: "form-field",
                        span { class: "form-label", "Password" }
                        input {
                            r#type: "password",
                            autocomplete: "new-password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }
                    label {
                        class: "form-field",
                        span { class: "form-label", "Confirm Password" }
                        input {
                            r#type: "password",
                            autocomplete: "new-password",
                            value: "{confirm_password}",
                            oninput: move |evt| confirm_password.set(evt.value()),
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "btn btn-primary btn-block",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Create Account" }
                    }

                    p {
                        class: "auth-switch",
                        "Already registered? "
                        Link { to: Route::Login {}, "Sign in" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_checks_in_order() {
        assert_eq!(check("", "a@b.co", "password1", "password1"), Some("Username is required"));
        assert_eq!(check("sam", "nope", "password1", "password1"), Some("Please enter a valid email"));
        assert_eq!(check("sam", "a@b.co", "short", "short"), Some("Password must be at least 8 characters"));
        assert_eq!(check("sam", "a@b.co", "password1", "password2"), Some("Passwords do not match"));
        assert_eq!(check("sam", "a@b.co", "password1", "password1"), None);
    }
}
