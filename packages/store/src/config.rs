//! # Dashboard configuration (`dashboard.toml`)
//!
//! Client-side tuning knobs for the dashboard (filename:
//! [`DashboardConfig::filename`] = `"dashboard.toml"`). The file is optional;
//! the `API_BASE_URL` environment variable still overrides `api.base_url` at
//! startup.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//! timeout_secs = 10
//! debounce_ms = 200         # window in which identical GETs share one request
//! with_credentials = true
//!
//! [notifications]
//! auto_close_ms = 3000
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`DashboardConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiSettings`] | HTTP client settings. |
//! | [`NotificationSettings`] | Toast behaviour. |
//!
//! A missing or empty file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Top-level configuration stored in `dashboard.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// HTTP client settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Identical GET requests issued within this window share one response.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
    #[serde(default = "default_true")]
    pub with_credentials: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_debounce() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            debounce_ms: default_debounce(),
            with_credentials: true,
        }
    }
}

/// Toast configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_auto_close")]
    pub auto_close_ms: u64,
}

fn default_auto_close() -> u64 {
    3000
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            auto_close_ms: default_auto_close(),
        }
    }
}

impl DashboardConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "dashboard.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.debounce_ms, 200);
        assert_eq!(config.notifications.auto_close_ms, 3000);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            [api]
            base_url = "https://crm.example.com/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://crm.example.com/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.api.with_credentials);
    }

    #[test]
    fn test_to_toml_parses_back() {
        let config = DashboardConfig::default().with_base_url("http://10.0.0.2:8000/api");
        let text = config.to_toml().unwrap();
        assert!(text.contains("[api]"));
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }
}
