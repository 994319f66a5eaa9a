//! App-wide values provided once by the shell.

use api::ApiClient;
use dioxus::prelude::*;
use store::{DashboardConfig, TrafficTracker};

/// The loaded configuration.
pub fn use_config() -> DashboardConfig {
    use_context::<DashboardConfig>()
}

/// Origin that relative media paths from the backend resolve against.
pub fn use_media_origin() -> String {
    let config = use_config();
    api::config::media_origin(&config.api.base_url)
}

/// The shared API client.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_traffic() -> TrafficTracker {
    use_context::<TrafficTracker>()
}
