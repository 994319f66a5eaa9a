//! REST endpoint paths, relative to the API base URL.

pub const LOGIN: &str = "/login/";
pub const REGISTER: &str = "/register/";
pub const LOGOUT: &str = "/logout";
pub const PROFILE: &str = "/profile/";

pub const CMS_SETTINGS: &str = "/cms-settings/";
/// The backend keeps a single settings row.
pub const CMS_SETTINGS_DETAIL: &str = "/cms-settings/1/";

pub const LEADS: &str = "/leads/";
pub const DEALS: &str = "/deals/";

pub const ANALYTICS_OVERVIEW: &str = "/analytics/";
pub const ANALYTICS_AGENTS: &str = "/analytics/agents/";

pub const AGENT_LEADS: &str = "/agent/leads/";
pub const AGENT_ANALYTICS: &str = "/agent/analytics/";
pub const AGENT_REPORTS: &str = "/agent/reports/";
pub const AGENT_REVENUE: &str = "/agent/revenue/";

pub const PUBLIC_HERO: &str = "/public/hero/";
pub const PUBLIC_AGENTS: &str = "/public/agents/";
pub const PUBLIC_LEADS: &str = "/public/leads/";
pub const PUBLIC_PROPERTIES: &str = "/properties/";

/// `<list>/<id>/` for a list path ending in `/`.
pub fn detail(list: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{id}/", list.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail() {
        assert_eq!(detail(LEADS, 42), "/leads/42/");
        assert_eq!(detail(AGENT_LEADS, "7"), "/agent/leads/7/");
    }
}
