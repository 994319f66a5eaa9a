use api::analytics::{amount, count};
use api::models::LeadStatus;
use dioxus::prelude::*;
use serde_json::Value;

use super::analytics::{breakdown, percent, Breakdown};
use super::common::{format_timestamp, ErrorState, LoadingState, PageHeader, StatCard, StatusBadge};
use crate::auth::use_auth;
use crate::context::use_api;
use crate::crud::list::truncate;
use crate::toast::use_toasts;

/// A recently touched lead from `recent_activity`.
#[derive(Clone, Debug, PartialEq)]
struct Activity {
    id: String,
    name: String,
    email: String,
    status: LeadStatus,
    updated_at: Option<String>,
    note: Option<String>,
}

fn recent_activity(data: &Value) -> Vec<Activity> {
    let Some(rows) = data.get("recent_activity").and_then(Value::as_array) else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| {
            let text = |key: &str| row.get(key).and_then(Value::as_str).map(str::to_string);
            // `internal_notes` is an object keyed by note id, or a list.
            let note = match row.get("internal_notes") {
                Some(Value::Object(map)) => map.values().next(),
                Some(Value::Array(items)) => items.first(),
                _ => None,
            }
            .and_then(|n| n.get("note"))
            .and_then(Value::as_str)
            .map(|n| truncate(n, 140));
            Activity {
                id: api::record_id(row).unwrap_or_default(),
                name: text("name").unwrap_or_default(),
                email: text("email").unwrap_or_default(),
                status: text("status")
                    .map(|s| LeadStatus::parse(&s))
                    .unwrap_or_default(),
                updated_at: text("updated_at"),
                note,
            }
        })
        .collect()
}

/// Landing page of the agent workspace.
#[component]
pub fn AgentDashboardPage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let auth = use_auth();
    let mut reload = use_signal(|| 0u32);

    let analytics = use_resource(move || {
        let client = client.clone();
        let _ = reload();
        async move {
            api::analytics::my_analytics(&client).await.map_err(|e| {
                tracing::error!("loading agent analytics failed: {e}");
                toasts.error("Could not load dashboard data. Please try again.");
                e.user_message("Could not load dashboard data")
            })
        }
    });

    let name = auth
        .read()
        .user()
        .map(|u| u.display_name())
        .unwrap_or_default();
    let data = analytics.read().clone();

    rsx! {
        PageHeader { title: "My Dashboard", subtitle: format!("Welcome back, {name}") }

        {match data {
            None => rsx! { LoadingState { message: "Loading your dashboard..." } },
            Some(Err(message)) => rsx! {
                ErrorState { message, on_retry: move |_| reload += 1 }
            },
            Some(Ok(data)) => {
                let total = count(&data, "overview/total_leads");
                let activity = recent_activity(&data);
                rsx! {
                    div {
                        class: "stat-grid",
                        StatCard { label: "My Leads", value: total.to_string(), class: "stat-card accent-blue" }
                        StatCard { label: "Converted", value: count(&data, "overview/converted_leads").to_string(), class: "stat-card accent-green" }
                        StatCard { label: "In Progress", value: count(&data, "overview/in_progress_leads").to_string(), class: "stat-card accent-orange" }
                        StatCard { label: "Conversion Rate", value: percent(amount(&data, "overview/conversion_rate")), class: "stat-card accent-purple" }
                    }
                    if total == 0 {
                        div {
                            class: "callout callout-info",
                            "You don't have any assigned leads yet."
                        }
                    }
                    div {
                        class: "panel-grid",
                        Breakdown {
                            title: "My Leads by Status",
                            rows: breakdown(&data, "status_breakdown", "status"),
                            total,
                        }
                        section {
                            class: "panel",
                            h3 { class: "section-title", "Recent Activity" }
                            if activity.is_empty() {
                                p { class: "muted", "No recent activity." }
                            } else {
                                ul {
                                    class: "activity-list",
                                    for item in activity {
                                        li {
                                            key: "{item.id}",
                                            div {
                                                class: "activity-head",
                                                div {
                                                    p { class: "cell-title", "{item.name}" }
                                                    p { class: "cell-sub", "{item.email}" }
                                                }
                                                StatusBadge { status: item.status }
                                            }
                                            if let Some(at) = item.updated_at.as_deref() {
                                                p { class: "cell-sub", "Updated: {format_timestamp(at)}" }
                                            }
                                            if let Some(note) = item.note {
                                                p { class: "activity-note", "{note}" }
                                            }
                                        }
                                    }
                                }
                            }
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
    fn test_recent_activity_first_note() {
        let long = "x".repeat(200);
        let items = recent_activity(&json!({
            "recent_activity": [
                {"id": 1, "name": "Lina", "email": "l@x.io", "status": "contacted",
                 "internal_notes": {"9": {"note": long}}},
                {"id": 2, "name": "Sam", "status": "converted"}
            ]
        }));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].status, LeadStatus::Contacted);
        assert!(items[0].note.as_deref().unwrap().ends_with("..."));
        assert_eq!(items[1].note, None);
        assert_eq!(items[1].status, LeadStatus::Converted);
    }
}
