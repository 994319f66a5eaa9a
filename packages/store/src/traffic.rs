//! First-touch traffic attribution for public lead submissions.
//!
//! On the first page load of a browser session the landing URL and referrer
//! are classified into a [`TrafficSource`] and stored; later lead submissions
//! attach that data via [`TrafficTracker::data`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

const TRAFFIC_SOURCE_KEY: &str = "traffic_source";
const UTM_SOURCE_KEY: &str = "utm_source";
const UTM_MEDIUM_KEY: &str = "utm_medium";
const UTM_CAMPAIGN_KEY: &str = "utm_campaign";
const FIRST_LANDING_PAGE_KEY: &str = "first_landing_page";
const SESSION_STARTED_KEY: &str = "session_started";

const ALL_KEYS: [&str; 6] = [
    TRAFFIC_SOURCE_KEY,
    UTM_SOURCE_KEY,
    UTM_MEDIUM_KEY,
    UTM_CAMPAIGN_KEY,
    FIRST_LANDING_PAGE_KEY,
    SESSION_STARTED_KEY,
];

const SOCIAL_DOMAINS: [&str; 9] = [
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
    "reddit.com",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficSource {
    #[default]
    Organic,
    Ads,
    Campaign,
    Referral,
    Social,
    Direct,
    Other,
}

impl TrafficSource {
    pub const ALL: [TrafficSource; 7] = [
        TrafficSource::Organic,
        TrafficSource::Ads,
        TrafficSource::Campaign,
        TrafficSource::Referral,
        TrafficSource::Social,
        TrafficSource::Direct,
        TrafficSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficSource::Organic => "organic",
            TrafficSource::Ads => "ads",
            TrafficSource::Campaign => "campaign",
            TrafficSource::Referral => "referral",
            TrafficSource::Social => "social",
            TrafficSource::Direct => "direct",
            TrafficSource::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrafficSource::Organic => "Organic",
            TrafficSource::Ads => "Advertisement",
            TrafficSource::Campaign => "Marketing Campaign",
            TrafficSource::Referral => "Referral",
            TrafficSource::Social => "Social Media",
            TrafficSource::Direct => "Direct",
            TrafficSource::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "organic" => TrafficSource::Organic,
            "ads" => TrafficSource::Ads,
            "campaign" => TrafficSource::Campaign,
            "referral" => TrafficSource::Referral,
            "social" => TrafficSource::Social,
            "direct" => TrafficSource::Direct,
            "other" => TrafficSource::Other,
            _ => return None,
        })
    }
}

/// What the browser tells us about the landing request.
#[derive(Clone, Debug, Default)]
pub struct LandingContext {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    /// Hostname of `document.referrer`, if any.
    pub referrer_host: Option<String>,
    pub current_host: String,
    /// Path plus query string of the landing page.
    pub landing_path: String,
}

impl LandingContext {
    pub fn classify(&self) -> TrafficSource {
        let source = non_empty(&self.utm_source);
        let medium = non_empty(&self.utm_medium);

        if source.is_some() || medium.is_some() {
            let medium = medium.unwrap_or_default().to_lowercase();
            return if ["cpc", "paid", "ppc"].iter().any(|m| medium.contains(m)) {
                TrafficSource::Ads
            } else {
                TrafficSource::Campaign
            };
        }

        match non_empty(&self.referrer_host) {
            Some(host) if SOCIAL_DOMAINS.iter().any(|d| host.contains(d)) => TrafficSource::Social,
            Some(host) if host != self.current_host => TrafficSource::Referral,
            _ => TrafficSource::Direct,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Attribution fields sent with a public lead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingData {
    pub traffic_source: TrafficSource,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub source_page: String,
}

#[derive(Clone)]
pub struct TrafficTracker {
    storage: Arc<dyn KeyValueStore>,
}

impl TrafficTracker {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Record first-touch attribution. Returns `false` if this session was
    /// already initialized, leaving the stored data untouched.
    pub fn initialize(&self, ctx: &LandingContext) -> bool {
        if self.storage.get(SESSION_STARTED_KEY).is_some() {
            return false;
        }

        let source = ctx.classify();
        self.storage.set(TRAFFIC_SOURCE_KEY, source.as_str());
        for (key, value) in [
            (UTM_SOURCE_KEY, &ctx.utm_source),
            (UTM_MEDIUM_KEY, &ctx.utm_medium),
            (UTM_CAMPAIGN_KEY, &ctx.utm_campaign),
        ] {
            if let Some(value) = non_empty(value) {
                self.storage.set(key, value);
            }
        }
        if !ctx.landing_path.is_empty() {
            self.storage.set(FIRST_LANDING_PAGE_KEY, &ctx.landing_path);
        }
        self.storage.set(SESSION_STARTED_KEY, "true");

        tracing::info!(source = source.as_str(), "traffic tracking initialized");
        true
    }

    /// Stored attribution, defaulting to organic and the current path.
    pub fn data(&self, current_path: &str) -> TrackingData {
        TrackingData {
            traffic_source: self
                .storage
                .get(TRAFFIC_SOURCE_KEY)
                .and_then(|s| TrafficSource::parse(&s))
                .unwrap_or_default(),
            utm_source: self.storage.get(UTM_SOURCE_KEY),
            utm_medium: self.storage.get(UTM_MEDIUM_KEY),
            utm_campaign: self.storage.get(UTM_CAMPAIGN_KEY),
            source_page: self
                .storage
                .get(FIRST_LANDING_PAGE_KEY)
                .unwrap_or_else(|| current_path.to_string()),
        }
    }

    pub fn reset(&self) {
        for key in ALL_KEYS {
            self.storage.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn ctx() -> LandingContext {
        LandingContext {
            current_host: "homes.example.com".to_string(),
            landing_path: "/?utm_source=google".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_utm() {
        let mut c = ctx();
        c.utm_source = Some("google".to_string());
        c.utm_medium = Some("CPC".to_string());
        assert_eq!(c.classify(), TrafficSource::Ads);

        c.utm_medium = Some("newsletter".to_string());
        assert_eq!(c.classify(), TrafficSource::Campaign);

        // UTM wins over a social referrer.
        c.referrer_host = Some("www.facebook.com".to_string());
        assert_eq!(c.classify(), TrafficSource::Campaign);
    }

    #[test]
    fn test_classify_referrer() {
        let mut c = ctx();
        assert_eq!(c.classify(), TrafficSource::Direct);

        c.referrer_host = Some("l.instagram.com".to_string());
        assert_eq!(c.classify(), TrafficSource::Social);

        c.referrer_host = Some("blog.partner.ae".to_string());
        assert_eq!(c.classify(), TrafficSource::Referral);

        c.referrer_host = Some("homes.example.com".to_string());
        assert_eq!(c.classify(), TrafficSource::Direct);
    }

    #[test]
    fn test_initialize_once_per_session() {
        let storage = Arc::new(MemoryStorage::new());
        let tracker = TrafficTracker::new(storage);

        let mut first = ctx();
        first.utm_source = Some("google".to_string());
        first.utm_medium = Some("paid_search".to_string());
        assert!(tracker.initialize(&first));

        let mut second = ctx();
        second.referrer_host = Some("facebook.com".to_string());
        second.landing_path = "/properties".to_string();
        assert!(!tracker.initialize(&second));

        let data = tracker.data("/contact");
        assert_eq!(data.traffic_source, TrafficSource::Ads);
        assert_eq!(data.utm_source.as_deref(), Some("google"));
        assert_eq!(data.utm_campaign, None);
        assert_eq!(data.source_page, "/?utm_source=google");
    }

    #[test]
    fn test_data_defaults_without_tracking() {
        let tracker = TrafficTracker::new(Arc::new(MemoryStorage::new()));
        let data = tracker.data("/contact");
        assert_eq!(data.traffic_source, TrafficSource::Organic);
        assert_eq!(data.source_page, "/contact");
    }

    #[test]
    fn test_reset_allows_reinitialize() {
        let storage = Arc::new(MemoryStorage::new());
        let tracker = TrafficTracker::new(storage.clone());
        tracker.initialize(&ctx());
        tracker.reset();
        assert!(storage.is_empty());
        assert!(tracker.initialize(&ctx()));
    }
}
