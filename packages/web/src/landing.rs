//! Attribution details of the page the visitor landed on.

use store::LandingContext;

#[cfg(target_arch = "wasm32")]
pub fn current() -> Option<LandingContext> {
    let window = web_sys::window()?;
    let location = window.location();
    let search = location.search().unwrap_or_default();
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let referrer = window.document().map(|d| d.referrer()).unwrap_or_default();

    Some(LandingContext {
        utm_source: params.get("utm_source"),
        utm_medium: params.get("utm_medium"),
        utm_campaign: params.get("utm_campaign"),
        referrer_host: referrer_host(&referrer),
        current_host: location.hostname().unwrap_or_default(),
        landing_path: format!("{}{}", location.pathname().unwrap_or_default(), search),
    })
}

/// Native builds have no landing page to attribute.
#[cfg(not(target_arch = "wasm32"))]
pub fn current() -> Option<LandingContext> {
    None
}

/// Host part of a referrer URL.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn referrer_host(referrer: &str) -> Option<String> {
    api::config::url_host(referrer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referrer_host() {
        assert_eq!(referrer_host("https://www.Facebook.com/share?x=1").as_deref(), Some("www.facebook.com"));
        assert_eq!(referrer_host("http://localhost:8080/"), Some("localhost".to_string()));
        assert_eq!(referrer_host(""), None);
        assert_eq!(referrer_host("not a url"), None);
        assert_eq!(referrer_host("https://bob@news.ycombinator.com/item"), Some("news.ycombinator.com".to_string()));
        assert_eq!(referrer_host("http://[2001:db8::1]:8080/"), Some("[2001:db8::1]".to_string()));
    }
}
