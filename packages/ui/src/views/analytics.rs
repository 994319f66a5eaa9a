//! Lead analytics: overview cards, status and traffic breakdowns, agent
//! performance.

use api::analytics::{amount, count};
use dioxus::prelude::*;
use serde_json::Value;

use super::common::{ErrorState, LoadingState, PageHeader, StatCard};
use crate::context::use_api;
use crate::icons::*;
use crate::Icon;

/// `in_progress` to `In Progress`.
pub fn humanize(raw: &str) -> String {
    raw.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn percent(rate: f64) -> String {
    format!("{rate:.1}%")
}

/// `(label, count)` rows of `value[list]`, keyed by `field`.
pub fn breakdown(value: &Value, list: &str, field: &str) -> Vec<(String, u64)> {
    value
        .get(list)
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| {
                    let key = row.get(field)?.as_str()?;
                    Some((humanize(key), count(row, "count")))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Horizontal bars, each as a share of `total`.
#[component]
pub fn Breakdown(title: String, rows: Vec<(String, u64)>, total: u64) -> Element {
    let bars: Vec<(String, u64, String)> = rows
        .into_iter()
        .map(|(label, n)| {
            let share = if total > 0 { n as f64 / total as f64 * 100.0 } else { 0.0 };
            (label, n, format!("width: {share:.1}%"))
        })
        .collect();

    rsx! {
        section {
            class: "panel",
            h3 { class: "section-title", "{title}" }
            if bars.is_empty() {
                p { class: "muted", "No data yet." }
            } else {
                ul {
                    class: "bar-list",
                    for (label, n, width) in bars {
                        li {
                            key: "{label}",
                            span { class: "bar-label", "{label}" }
                            div {
                                class: "bar-track",
                                div { class: "bar-fill", style: "{width}" }
                            }
                            span { class: "bar-value", "{n}" }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct AgentRow {
    id: String,
    name: String,
    total: u64,
    converted: u64,
    rate: f64,
}

fn agent_rows(rows: Vec<Value>) -> Vec<AgentRow> {
    rows.into_iter()
        .map(|row| {
            let id = row
                .get("agent_id")
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default();
            let name = ["agent_name", "agent_email"]
                .iter()
                .find_map(|k| row.get(*k).and_then(Value::as_str).filter(|s| !s.is_empty()))
                .map(str::to_string)
                .unwrap_or_else(|| format!("Agent #{id}"));
            AgentRow {
                name,
                total: count(&row, "total_leads"),
                converted: count(&row, "converted_leads"),
                rate: amount(&row, "conversion_rate"),
                id,
            }
        })
        .collect()
}

#[component]
pub fn AnalyticsPage() -> Element {
    let client = use_api();
    let mut reload = use_signal(|| 0u32);

    let overview_client = client.clone();
    let overview = use_resource(move || {
        let client = overview_client.clone();
        let _ = reload();
        async move {
            api::analytics::overview(&client).await.map_err(|e| {
                tracing::error!("loading analytics failed: {e}");
                e.user_message("Failed to load analytics data")
            })
        }
    });

    let agents = use_resource(move || {
        let client = client.clone();
        let _ = reload();
        async move {
            api::analytics::agent_performance(&client)
                .await
                .map(agent_rows)
                .unwrap_or_else(|e| {
                    tracing::warn!("loading agent performance failed: {e}");
                    Vec::new()
                })
        }
    });

    let data = overview.read().clone();
    let performance = agents.read().clone().unwrap_or_default();

    rsx! {
        PageHeader {
            title: "Analytics",
            subtitle: "Lead volume, conversion and where visitors come from",
            button {
                class: "btn btn-outline",
                onclick: move |_| reload += 1,
                Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                " Refresh"
            }
        }

        {match data {
            None => rsx! { LoadingState { message: "Loading analytics..." } },
            Some(Err(message)) => rsx! {
                ErrorState { message, on_retry: move |_| reload += 1 }
            },
            Some(Ok(data)) => {
                let total = count(&data, "overview/total_leads");
                rsx! {
                    div {
                        class: "stat-grid",
                        StatCard { label: "Total Leads", value: total.to_string() }
                        StatCard { label: "Recent Leads", value: count(&data, "overview/recent_leads").to_string() }
                        StatCard { label: "Converted", value: count(&data, "overview/converted_leads").to_string() }
                        StatCard { label: "Conversion Rate", value: percent(amount(&data, "overview/conversion_rate")) }
                    }
                    div {
                        class: "panel-grid",
                        Breakdown {
                            title: "Leads by Status",
                            rows: breakdown(&data, "status_breakdown", "status"),
                            total,
                        }
                        Breakdown {
                            title: "Traffic Sources",
                            rows: breakdown(&data, "traffic_breakdown", "traffic_source"),
                            total,
                        }
                    }
                }
            }
        }}

        if !performance.is_empty() {
            section {
                class: "panel",
                h3 { class: "section-title", "Agent Performance" }
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Agent" }
                            th { "Total Leads" }
                            th { "Converted" }
                            th { "Conversion Rate" }
                        }
                    }
                    tbody {
                        for agent in performance {
                            tr {
                                key: "{agent.id}",
                                td {
                                    div { class: "cell-title", "{agent.name}" }
                                    div { class: "cell-sub", "ID: {agent.id}" }
                                }
                                td { "{agent.total}" }
                                td { "{agent.converted}" }
                                td { class: "amount", "{percent(agent.rate)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("in_progress"), "In Progress");
        assert_eq!(humanize("closed_lost"), "Closed Lost");
        assert_eq!(humanize("ads"), "Ads");
    }

    #[test]
    fn test_breakdown_rows() {
        let data = json!({
            "traffic_breakdown": [
                {"traffic_source": "social", "count": 4},
                {"count": 2},
                {"traffic_source": "direct", "count": "3"}
            ]
        });
        assert_eq!(
            breakdown(&data, "traffic_breakdown", "traffic_source"),
            vec![("Social".to_string(), 4), ("Direct".to_string(), 3)]
        );
        assert!(breakdown(&data, "status_breakdown", "status").is_empty());
    }

    #[test]
    fn test_agent_rows_name_fallbacks() {
        let rows = agent_rows(vec![
            json!({"agent_id": 3, "agent_name": "Sara", "total_leads": 10, "converted_leads": 4, "conversion_rate": 40.0}),
            json!({"agent_id": 4, "agent_name": "", "agent_email": "omar@x.io"}),
            json!({"agent_id": 5}),
        ]);
        assert_eq!(rows[0].name, "Sara");
        assert_eq!(rows[0].rate, 40.0);
        assert_eq!(rows[1].name, "omar@x.io");
        assert_eq!(rows[2].name, "Agent #5");
    }
}
