//! # Signed-in user profile
//!
//! [`UserProfile`] is the client-side view of the authenticated account as
//! returned by `/login/` and `/profile/`. Every field is `#[serde(default)]`
//! because the backend sends different subsets depending on the endpoint and
//! on whether the account is an agent.
//!
//! Role flags follow the backend's mixed conventions: an explicit `role`
//! string plus legacy `is_staff` / `is_superuser` / `is_admin` / `is_agent`
//! booleans. [`UserProfile::is_admin`] and [`UserProfile::is_agent`] fold them
//! into the two questions the route gates ask.

use serde::{Deserialize, Serialize};

/// Account role as reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Agent,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Agent => "agent",
            Role::User => "user",
        }
    }
}

/// Profile of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_admin: bool,
    pub is_agent: bool,
    // Agent profile fields
    pub title: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin || self.is_admin || self.is_staff || self.is_superuser
    }

    pub fn is_agent(&self) -> bool {
        self.role == Role::Agent || self.is_agent
    }

    /// Name shown in the shell: explicit name, then first/last, then the
    /// local part of the email address.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        if let Some(first) = self.first_name.as_deref().filter(|n| !n.trim().is_empty()) {
            let last = self.last_name.as_deref().unwrap_or_default();
            return format!("{first} {last}").trim().to_string();
        }
        if !self.username.is_empty() {
            return self.username.clone();
        }
        email_local_part(&self.email).to_string()
    }

    /// Fill `name` from the other identity fields when the backend omitted it.
    pub fn normalized(mut self) -> Self {
        if self.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            self.name = Some(self.display_name());
        }
        self
    }
}

/// Everything before the `@` of an email address.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_flags() {
        let admin: UserProfile =
            serde_json::from_str(r#"{"email":"a@x.io","role":"admin"}"#).unwrap();
        assert!(admin.is_admin());
        assert!(!admin.is_agent());

        let staff: UserProfile =
            serde_json::from_str(r#"{"email":"s@x.io","role":"user","is_staff":true}"#).unwrap();
        assert!(staff.is_admin());

        let agent: UserProfile =
            serde_json::from_str(r#"{"email":"g@x.io","role":"agent"}"#).unwrap();
        assert!(agent.is_agent());
        assert!(!agent.is_admin());
    }

    #[test]
    fn test_unknown_role_is_user() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"email":"m@x.io","role":"manager"}"#).unwrap();
        assert_eq!(profile.role, Role::User);
        assert!(!profile.is_admin());
        assert!(!profile.is_agent());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut profile = UserProfile {
            email: "jane.doe@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "jane.doe");

        profile.first_name = Some("Jane".to_string());
        assert_eq!(profile.display_name(), "Jane");

        profile.last_name = Some("Doe".to_string());
        assert_eq!(profile.display_name(), "Jane Doe");

        profile.name = Some("JD".to_string());
        assert_eq!(profile.display_name(), "JD");
    }

    #[test]
    fn test_normalized_fills_name() {
        let profile = UserProfile {
            email: "agent7@example.com".to_string(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(profile.name.as_deref(), Some("agent7"));
    }
}
