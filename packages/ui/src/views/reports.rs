use dioxus::prelude::*;
use serde_json::{json, Value};

use super::analytics::humanize;
use super::common::{format_date, ErrorState, LoadingState, PageHeader};
use crate::context::use_api;
use crate::crud::list::display_value;
use crate::icons::*;
use crate::toast::use_toasts;
use crate::Icon;

const REPORT_TYPES: [(&str, &str); 3] = [
    ("weekly", "Weekly Summary"),
    ("monthly", "Monthly Summary"),
    ("performance", "Performance Report"),
];

#[derive(Clone, Debug, PartialEq)]
struct ReportRow {
    id: String,
    kind: String,
    period: String,
    generated: String,
}

fn report_rows(rows: Vec<Value>) -> Vec<ReportRow> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let kind = ["type", "report_type"]
                .iter()
                .map(|k| display_value(&row, k))
                .find(|s| !s.is_empty())
                .map(|s| humanize(&s))
                .unwrap_or_else(|| "Report".to_string());
            let generated = ["generated", "created_at"]
                .iter()
                .map(|k| display_value(&row, k))
                .find(|s| !s.is_empty());
            ReportRow {
                id: api::record_id(&row).unwrap_or_else(|| i.to_string()),
                kind,
                period: display_value(&row, "period"),
                generated: format_date(generated.as_deref()),
            }
        })
        .collect()
}

/// Generated reports of the signed-in agent.
#[component]
pub fn AgentReportsPage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let mut reload = use_signal(|| 0u32);
    let mut report_type = use_signal(|| REPORT_TYPES[0].0.to_string());
    let mut generating = use_signal(|| false);

    let list_client = client.clone();
    let reports = use_resource(move || {
        let client = list_client.clone();
        let _ = reload();
        async move {
            api::agent::reports(&client)
                .await
                .map(report_rows)
                .map_err(|e| {
                    tracing::error!("loading reports failed: {e}");
                    toasts.error("Failed to fetch reports");
                    e.user_message("Error loading reports")
                })
        }
    });

    let generate = move |_| {
        let client = client.clone();
        let request = json!({ "report_type": report_type() });
        generating.set(true);
        spawn(async move {
            match api::agent::generate_report(&client, request).await {
                Ok(_) => {
                    toasts.success("Report generated successfully");
                    reload += 1;
                }
                Err(e) => {
                    tracing::error!("generating report failed: {e}");
                    toasts.error(e.user_message("Failed to generate report"));
                }
            }
            generating.set(false);
        });
    };

    let data = reports.read().clone();

    rsx! {
        PageHeader {
            title: "Reports",
            subtitle: "Summaries of your lead activity",
            select {
                value: "{report_type}",
                onchange: move |evt| report_type.set(evt.value()),
                for (value, label) in REPORT_TYPES {
                    option { key: "{value}", value: "{value}", "{label}" }
                }
            }
            button {
                class: "btn btn-primary",
                disabled: generating(),
                onclick: generate,
                Icon { icon: FaFileLines, width: 14, height: 14 }
                if generating() { " Generating..." } else { " Generate Report" }
            }
        }

        {match data {
            None => rsx! { LoadingState { message: "Loading reports..." } },
            Some(Err(message)) => rsx! {
                ErrorState { message, on_retry: move |_| reload += 1 }
            },
            Some(Ok(rows)) if rows.is_empty() => rsx! {
                div {
                    class: "empty-state",
                    h3 { "No reports available" }
                    p { "Reports will be available once you have activity data." }
                }
            },
            Some(Ok(rows)) => rsx! {
                div {
                    class: "table-card",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Report Type" }
                                th { "Period" }
                                th { "Generated" }
                            }
                        }
                        tbody {
                            for row in rows {
                                tr {
                                    key: "{row.id}",
                                    td { "{row.kind}" }
                                    td { "{row.period}" }
                                    td { "{row.generated}" }
                                }
                            }
                        }
                    }
                }
            },
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_rows() {
        let rows = report_rows(vec![
            json!({"id": 4, "type": "monthly", "period": "2024-05", "generated": "2024-06-01T08:00:00Z"}),
            json!({"report_type": "performance"}),
        ]);
        assert_eq!(rows[0].kind, "Monthly");
        assert_eq!(rows[0].generated, "2024-06-01");
        assert_eq!(rows[1].id, "1");
        assert_eq!(rows[1].kind, "Performance");
        assert_eq!(rows[1].generated, "-");
    }
}
