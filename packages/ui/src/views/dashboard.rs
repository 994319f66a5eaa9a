use api::analytics::{amount, count, status_counts};
use api::resource::{self, Resource};
use api::{CrudApi, ResourceApi};
use dioxus::prelude::*;
use serde_json::Value;

use super::analytics::humanize;
use super::common::{format_amount, LoadingState, PageHeader, StatCard};
use crate::auth::use_auth;
use crate::context::use_api;
use crate::toast::use_toasts;

/// Statuses shown on the overview, in pipeline order.
const PIPELINE: [&str; 5] = ["new", "contacted", "in_progress", "converted", "closed_lost"];

#[derive(Clone, Debug, Default, PartialEq)]
struct Overview {
    total_leads: u64,
    by_status: Vec<(String, u64)>,
    agents: usize,
    properties: usize,
    revenue: f64,
}

impl Overview {
    fn from_analytics(data: &Value) -> Self {
        let counts = data
            .get("leads_by_status")
            .or_else(|| data.get("status_breakdown"))
            .map(status_counts)
            .unwrap_or_default();
        let by_status = PIPELINE
            .iter()
            .map(|status| {
                let n = counts
                    .iter()
                    .find(|(s, _)| s == status)
                    .map(|(_, n)| *n)
                    .unwrap_or_default();
                (status.to_string(), n)
            })
            .collect();
        let total_leads = match count(data, "overview/total_leads") {
            0 => count(data, "total_leads"),
            n => n,
        };
        Self {
            total_leads,
            by_status,
            revenue: amount(data, "total_revenue"),
            ..Default::default()
        }
    }

    fn status(&self, status: &str) -> u64 {
        self.by_status
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, n)| *n)
            .unwrap_or_default()
    }
}

async fn collection_size(collection: &ResourceApi) -> usize {
    match collection.get_all().await {
        Ok(value) => api::normalize_list(value).len(),
        Err(e) => {
            tracing::warn!("counting {} failed: {e}", collection.resource().segment);
            0
        }
    }
}

/// Admin landing page.
#[component]
pub fn DashboardPage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let auth = use_auth();

    let overview = use_resource(move || {
        let client = client.clone();
        async move {
            let analytics = api::analytics::overview(&client).await;
            if let Err(e) = &analytics {
                tracing::error!("loading dashboard analytics failed: {e}");
                toasts.error("Failed to fetch dashboard data");
            }
            let mut overview = analytics
                .map(|data| Overview::from_analytics(&data))
                .unwrap_or_default();
            let sized = |r: Resource| ResourceApi::new(client.clone(), r);
            overview.agents = collection_size(&sized(resource::AGENTS)).await;
            overview.properties = collection_size(&sized(resource::PROPERTIES)).await;
            overview
        }
    });

    let greeting = auth
        .read()
        .user()
        .map(|u| format!("Welcome back, {}", u.display_name()))
        .unwrap_or_else(|| "Welcome back".to_string());
    let data = overview.read().clone();

    rsx! {
        PageHeader { title: "Dashboard", subtitle: greeting }

        {match data {
            None => rsx! { LoadingState { message: "Loading dashboard..." } },
            Some(stats) => {
                let revenue = format_amount(stats.revenue, "AED");
                rsx! {
                    div {
                        class: "stat-grid",
                        StatCard { label: "Total Leads", value: stats.total_leads.to_string(), class: "stat-card accent-blue" }
                        StatCard { label: "Converted", value: stats.status("converted").to_string(), class: "stat-card accent-green" }
                        StatCard { label: "Properties", value: stats.properties.to_string(), class: "stat-card accent-purple" }
                        StatCard { label: "Agents", value: stats.agents.to_string(), class: "stat-card accent-orange" }
                    }

                    section {
                        class: "panel",
                        h3 { class: "section-title", "Lead Pipeline" }
                        div {
                            class: "pipeline",
                            for (status, n) in stats.by_status.clone() {
                                div {
                                    key: "{status}",
                                    class: "pipeline-step status-{status}",
                                    span { class: "pipeline-count", "{n}" }
                                    span { class: "pipeline-label", "{humanize(&status)}" }
                                }
                            }
                        }
                    }

                    if stats.revenue > 0.0 {
                        section {
                            class: "panel revenue-panel",
                            h3 { class: "section-title", "Total Revenue" }
                            p { class: "revenue-total", "{revenue}" }
                        }
                    }
                }
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_overview_fills_missing_statuses() {
        let overview = Overview::from_analytics(&json!({
            "overview": {"total_leads": 9},
            "status_breakdown": [
                {"status": "new", "count": 5},
                {"status": "converted", "count": 4}
            ],
            "total_revenue": "1200000.00"
        }));
        assert_eq!(overview.total_leads, 9);
        assert_eq!(overview.by_status.len(), PIPELINE.len());
        assert_eq!(overview.status("new"), 5);
        assert_eq!(overview.status("contacted"), 0);
        assert_eq!(overview.revenue, 1_200_000.0);
    }

    #[test]
    fn test_overview_from_empty_payload() {
        let overview = Overview::from_analytics(&json!({}));
        assert_eq!(overview.total_leads, 0);
        assert_eq!(overview.status("converted"), 0);
    }
}
