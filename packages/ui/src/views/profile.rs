//! The signed-in user's own profile.

use api::auth::ImageUpload;
use dioxus::prelude::*;
use serde_json::{Map, Value};
use store::UserProfile;
use thiserror::Error;

use super::common::PageHeader;
use crate::auth::{update_user, use_auth};
use crate::context::{use_api, use_media_origin};
use crate::crud::list::media_url;
use crate::crud::FileUpload;
use crate::toast::use_toasts;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("No changes to save")]
    NoChanges,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Editable profile fields as the inputs hold them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub title: String,
    pub phone: String,
    pub bio: String,
    pub password: String,
    pub confirm_password: String,
    pub image: Option<FileUpload>,
}

impl ProfileDraft {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            title: user.title.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Fields that differ from `user`, plus the new password and picture.
    pub fn changes(
        &self,
        user: &UserProfile,
    ) -> Result<(Map<String, Value>, Option<ImageUpload>), ProfileError> {
        if !self.password.is_empty() && self.password != self.confirm_password {
            return Err(ProfileError::PasswordMismatch);
        }

        let mut fields = Map::new();
        for (name, value, current) in [
            ("title", &self.title, &user.title),
            ("phone", &self.phone, &user.phone),
            ("bio", &self.bio, &user.bio),
        ] {
            if value.as_str() != current.as_deref().unwrap_or_default() {
                fields.insert(name.to_string(), Value::String(value.clone()));
            }
        }
        if !self.password.is_empty() {
            fields.insert("password".to_string(), Value::String(self.password.clone()));
        }

        let image = self.image.clone().map(|f| ImageUpload {
            file_name: f.file_name,
            mime: f.mime,
            bytes: f.bytes,
        });
        if fields.is_empty() && image.is_none() {
            return Err(ProfileError::NoChanges);
        }
        Ok((fields, image))
    }
}

/// Stored picture path from an update response (`{user: {...}}` or flat).
fn returned_image(response: &Value) -> Option<String> {
    let user = response.get("user").unwrap_or(response);
    ["profile_image_url", "profile_image"]
        .iter()
        .find_map(|k| user.get(*k).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[component]
pub fn ProfilePage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let auth = use_auth();
    let media_origin = use_media_origin();

    let user = auth.read().user().cloned().unwrap_or_default();
    let seed = user.clone();
    let mut draft = use_signal(move || ProfileDraft::from_user(&seed));
    let mut saving = use_signal(|| false);

    let picture = user
        .profile_image
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|p| media_url(&media_origin, p));
    let picked = draft.read().image.as_ref().map(|f| f.file_name.clone());
    let initials: String = user
        .display_name()
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();

    let current = user.clone();
    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let (fields, image) = match draft.read().changes(&current) {
            Ok(changes) => changes,
            Err(ProfileError::NoChanges) => {
                toasts.info(ProfileError::NoChanges.to_string());
                return;
            }
            Err(e) => {
                toasts.error(e.to_string());
                return;
            }
        };
        let client = client.clone();
        saving.set(true);
        spawn(async move {
            match api::auth::update_profile(&client, fields.clone(), image).await {
                Ok(response) => {
                    let stored = returned_image(&response);
                    update_user(auth, &client, |u| {
                        for (name, value) in &fields {
                            let value = value.as_str().map(str::to_string);
                            match name.as_str() {
                                "title" => u.title = value,
                                "phone" => u.phone = value,
                                "bio" => u.bio = value,
                                _ => {}
                            }
                        }
                        if stored.is_some() {
                            u.profile_image = stored;
                        }
                    });
                    let mut d = draft.write();
                    d.password.clear();
                    d.confirm_password.clear();
                    d.image = None;
                    toasts.success("Profile updated successfully");
                }
                Err(e) => {
                    tracing::error!("profile update failed: {e}");
                    toasts.error(e.user_message("Failed to update profile"));
                }
            }
            saving.set(false);
        });
    };

    let reset_user = user.clone();

    rsx! {
        PageHeader { title: "My Profile", subtitle: "Update how you appear to clients and colleagues" }

        form {
            class: "panel profile-form",
            onsubmit: save,

            div {
                class: "profile-picture",
                if let Some(src) = picture {
                    img { class: "avatar-lg", src: "{src}", alt: "Profile picture" }
                } else {
                    div { class: "avatar-lg avatar-initials", "{initials}" }
                }
                div {
                    h2 { "{user.display_name()}" }
                    p { class: "muted", "{user.role.as_str()}" }
                    label {
                        class: "btn btn-outline btn-sm",
                        "Change Photo"
                        input {
                            r#type: "file",
                            accept: "image/*",
                            class: "visually-hidden",
                            onchange: move |evt: FormEvent| async move {
                                let Some(file) = evt.files().into_iter().next() else {
                                    return;
                                };
                                let name = file.name();
                                match file.read_bytes().await {
                                    Ok(bytes) => draft.write().image = Some(FileUpload::new(name, bytes.to_vec())),
                                    Err(e) => tracing::warn!("could not read {name}: {e:?}"),
                                }
                            },
                        }
                    }
                    if let Some(name) = picked {
                        p { class: "form-hint", "Selected: {name}" }
                        button {
                            r#type: "button",
                            class: "link-btn",
                            onclick: move |_| draft.write().image = None,
                            "Remove"
                        }
                    }
                }
            }

            div {
                class: "form-grid",
                label {
                    class: "form-field",
                    span { class: "form-label", "Title / Position" }
                    input {
                        value: "{draft.read().title}",
                        oninput: move |evt| draft.write().title = evt.value(),
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Phone Number" }
                    input {
                        r#type: "tel",
                        value: "{draft.read().phone}",
                        oninput: move |evt| draft.write().phone = evt.value(),
                    }
                }
                label {
                    class: "form-field form-span",
                    span { class: "form-label", "Bio" }
                    textarea {
                        rows: "4",
                        value: "{draft.read().bio}",
                        oninput: move |evt| draft.write().bio = evt.value(),
                    }
                }
                label {
                    class: "form-field form-span",
                    span { class: "form-label", "Email Address" }
                    input { r#type: "email", value: "{user.email}", disabled: true }
                }
            }

            fieldset {
                class: "form-grid",
                legend { "Change Password" }
                p { class: "form-hint form-span", "Leave both fields blank if you don't want to change your password." }
                label {
                    class: "form-field",
                    span { class: "form-label", "New Password" }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{draft.read().password}",
                        oninput: move |evt| draft.write().password = evt.value(),
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Confirm New Password" }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{draft.read().confirm_password}",
                        oninput: move |evt| draft.write().confirm_password = evt.value(),
                    }
                }
            }

            div {
                class: "panel-actions",
                button {
                    r#type: "button",
                    class: "btn btn-outline",
                    disabled: saving(),
                    onclick: move |_| draft.set(ProfileDraft::from_user(&reset_user)),
                    "Reset"
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            title: Some("Broker".into()),
            phone: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_only_changed_fields_are_sent() {
        let mut draft = ProfileDraft::from_user(&user());
        assert_eq!(draft.changes(&user()), Err(ProfileError::NoChanges));

        draft.phone = "+971 4 000 0000".into();
        let (fields, image) = draft.changes(&user()).unwrap();
        assert_eq!(Value::Object(fields), json!({"phone": "+971 4 000 0000"}));
        assert!(image.is_none());
    }

    #[test]
    fn test_password_confirmation_must_match() {
        let mut draft = ProfileDraft::from_user(&user());
        draft.password = "secret1".into();
        draft.confirm_password = "secret2".into();
        assert_eq!(draft.changes(&user()), Err(ProfileError::PasswordMismatch));

        draft.confirm_password = "secret1".into();
        let (fields, _) = draft.changes(&user()).unwrap();
        assert_eq!(fields.get("password"), Some(&json!("secret1")));
    }

    #[test]
    fn test_picture_alone_is_a_change() {
        let mut draft = ProfileDraft::from_user(&user());
        draft.image = Some(FileUpload::new("me.png", vec![1]));
        let (fields, image) = draft.changes(&user()).unwrap();
        assert!(fields.is_empty());
        assert_eq!(image.unwrap().mime, "image/png");
    }

    #[test]
    fn test_returned_image_from_nested_user() {
        let response = json!({"user": {"profile_image_url": "/media/p.png"}});
        assert_eq!(returned_image(&response).as_deref(), Some("/media/p.png"));
        assert_eq!(returned_image(&json!({})), None);
    }
}
