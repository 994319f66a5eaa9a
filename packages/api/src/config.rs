//! Backend location from the environment.
//!
//! `API_BASE_URL` overrides the configured base URL. Native builds read it at
//! runtime (with `.env` support); browser builds bake it in at compile time.

use store::config::DEFAULT_BASE_URL;
use store::DashboardConfig;

pub const BASE_URL_VAR: &str = "API_BASE_URL";

/// Configuration with the environment applied on top of `config`.
pub fn load(mut config: DashboardConfig) -> DashboardConfig {
    if let Some(base_url) = base_url_from_env() {
        tracing::info!("using {BASE_URL_VAR}={base_url}");
        config.api.base_url = base_url;
    }
    config
}

#[cfg(not(target_arch = "wasm32"))]
fn base_url_from_env() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(BASE_URL_VAR).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn base_url_from_env() -> Option<String> {
    option_env!("API_BASE_URL")
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// `scheme://host[:port]` of the API base URL, used to resolve and strip
/// media URLs. Default ports are dropped.
pub fn media_origin(base_url: &str) -> String {
    let base = if base_url.is_empty() { DEFAULT_BASE_URL } else { base_url };
    match reqwest::Url::parse(base) {
        Ok(url) if url.origin().is_tuple() => url.origin().ascii_serialization(),
        Ok(_) => String::new(),
        Err(e) => {
            tracing::warn!("cannot parse base URL {base:?}: {e}");
            String::new()
        }
    }
}

/// Lowercased host of an absolute URL, if it has one.
pub fn url_host(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_origin() {
        assert_eq!(media_origin("http://localhost:8000/api"), "http://localhost:8000");
        assert_eq!(media_origin("https://crm.example.com/api/v1/"), "https://crm.example.com");
        assert_eq!(media_origin(""), "http://localhost:8000");
        assert_eq!(media_origin("not a url"), "");
    }

    #[test]
    fn test_media_origin_normalizes() {
        assert_eq!(media_origin("https://crm.example.com:443/api"), "https://crm.example.com");
        assert_eq!(media_origin("http://localhost:8000?v=1"), "http://localhost:8000");
        assert_eq!(media_origin("HTTPS://CRM.Example.com/api"), "https://crm.example.com");
    }

    #[test]
    fn test_url_host() {
        assert_eq!(url_host("https://user@www.Google.com:8443/search").as_deref(), Some("www.google.com"));
        assert_eq!(url_host("http://[::1]:3000/"), Some("[::1]".to_string()));
        assert_eq!(url_host("/relative"), None);
    }
}
