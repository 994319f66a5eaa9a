//! Widgets shared by the lead, revenue and analytics screens.

use api::models::{Lead, LeadStatus};
use dioxus::prelude::*;
use serde_json::Value;
use store::TrafficSource;

use crate::icons::*;
use crate::modal::ModalOverlay;
use crate::Icon;

pub const PAGE_SIZES: [u64; 4] = [10, 25, 50, 100];

/// `AED 1,250.50`; whole amounts drop the decimals.
pub fn format_amount(value: f64, currency: &str) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - whole as f64) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if cents > 0 {
        grouped.push_str(&format!(".{cents:02}"));
    }

    let sign = if negative { "-" } else { "" };
    if currency.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{currency} {sign}{grouped}")
    }
}

/// Date part of an ISO timestamp, `-` when absent.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.chars().take(10).collect(),
        None => "-".to_string(),
    }
}

/// `2024-03-05 at 14:30` for RFC 3339 input, otherwise the raw text.
pub fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d at %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn traffic_label(source: Option<&str>) -> String {
    match source {
        Some(s) => TrafficSource::parse(s)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| s.to_string()),
        None => "-".to_string(),
    }
}

/// Page buttons around `current`: two either side, clamped to `1..=total`.
pub fn page_window(current: u64, total: u64) -> Vec<u64> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total);
    (start..=end).collect()
}

/// An agent in a select box.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentOption {
    pub id: String,
    pub name: String,
}

/// Options from an `/agents/` list, skipping rows without an id.
pub fn agent_options(rows: Vec<Value>) -> Vec<AgentOption> {
    rows.into_iter()
        .filter_map(|row| {
            let id = api::record_id(&row)?;
            let text = |key: &str| {
                row.get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            let full = format!(
                "{} {}",
                text("first_name").unwrap_or_default(),
                text("last_name").unwrap_or_default()
            )
            .trim()
            .to_string();
            let name = text("full_name")
                .or((!full.is_empty()).then_some(full))
                .or_else(|| text("username"))
                .or_else(|| text("email"))
                .unwrap_or_else(|| format!("Agent #{id}"));
            Some(AgentOption { id, name })
        })
        .collect()
}

#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}

#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] hint: Option<String>,
    #[props(default = "stat-card".to_string())] class: String,
) -> Element {
    rsx! {
        div {
            class: "{class}",
            p { class: "stat-label", "{label}" }
            p { class: "stat-value", "{value}" }
            if let Some(hint) = hint {
                p { class: "stat-hint", "{hint}" }
            }
        }
    }
}

#[component]
pub fn StatusBadge(status: LeadStatus) -> Element {
    rsx! {
        span { class: "{status.badge_class()}", "{status.label()}" }
    }
}

#[component]
pub fn LoadingState(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "loading-state",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}

#[component]
pub fn ErrorState(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "error-state",
            p { "{message}" }
            button {
                class: "btn btn-outline",
                onclick: move |_| on_retry.call(()),
                "Try again"
            }
        }
    }
}

/// First / previous / numbered / next / last controls plus a page size picker.
#[component]
pub fn Pagination(
    page: u64,
    page_size: u64,
    count: u64,
    on_page: EventHandler<u64>,
    on_page_size: EventHandler<u64>,
) -> Element {
    let page = page.max(1);
    let total = if page_size == 0 { 1 } else { count.div_ceil(page_size).max(1) };
    let first_row = if count == 0 { 0 } else { (page - 1) * page_size + 1 };
    let last_row = (page * page_size).min(count);
    let has_prev = page > 1;
    let has_next = page < total;

    rsx! {
        div {
            class: "pagination",
            p {
                class: "pagination-summary",
                "Showing {first_row} to {last_row} of {count} results"
            }
            div {
                class: "pagination-controls",
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_prev,
                    onclick: move |_| on_page.call(1),
                    "« First"
                }
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_prev,
                    onclick: move |_| on_page.call(page - 1),
                    "‹ Prev"
                }
                for n in page_window(page, total) {
                    button {
                        key: "{n}",
                        class: if n == page { "btn btn-primary btn-sm" } else { "btn btn-outline btn-sm" },
                        onclick: move |_| on_page.call(n),
                        "{n}"
                    }
                }
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_next,
                    onclick: move |_| on_page.call(page + 1),
                    "Next ›"
                }
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_next,
                    onclick: move |_| on_page.call(total),
                    "Last »"
                }
            }
            label {
                class: "pagination-size",
                "Per page"
                select {
                    value: "{page_size}",
                    onchange: move |evt| {
                        if let Ok(size) = evt.value().parse::<u64>() {
                            on_page_size.call(size);
                        }
                    },
                    for size in PAGE_SIZES {
                        option { key: "{size}", value: "{size}", "{size}" }
                    }
                }
            }
        }
    }
}

/// Lead contact details and notes, most recent first.
#[component]
pub fn NotesTimeline(lead: Lead, on_close: EventHandler<()>) -> Element {
    let phone = lead.phone.clone().unwrap_or_else(|| "-".to_string());
    let message = lead.message.clone().filter(|m| !m.is_empty());
    let notes = lead.notes_history.clone();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            class: "modal-card modal-wide",
            div {
                class: "modal-header",
                h2 { class: "modal-title", "{lead.display_name()}" }
                button {
                    class: "icon-btn",
                    title: "Close",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaXmark, width: 16, height: 16 }
                }
            }
            dl {
                class: "detail-grid",
                dt { "Email" }
                dd { "{lead.email}" }
                dt { "Phone" }
                dd { "{phone}" }
                dt { "Status" }
                dd { StatusBadge { status: lead.status } }
                dt { "Agent" }
                dd { "{lead.agent_name()}" }
                dt { "Source" }
                dd { "{traffic_label(lead.traffic_source.as_deref())}" }
                dt { "Received" }
                dd { "{format_date(lead.created_at.as_deref())}" }
            }
            if let Some(message) = message {
                blockquote { class: "lead-message", "{message}" }
            }

            h3 { class: "section-title", "Notes History" }
            if notes.is_empty() {
                p { class: "muted", "No notes yet" }
            } else {
                ol {
                    class: "timeline",
                    for note in notes {
                        li {
                            key: "{note.id.clone().unwrap_or_default()}{note.note}",
                            class: "timeline-entry",
                            div {
                                class: "timeline-meta",
                                span { class: "timeline-author", "{note.user_name}" }
                                if let Some(at) = note.created_at.as_deref() {
                                    span { class: "timeline-time", "{format_timestamp(at)}" }
                                }
                            }
                            p { "{note.note}" }
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
    fn test_format_amount() {
        assert_eq!(format_amount(350_000.0, "AED"), "AED 350,000");
        assert_eq!(format_amount(1250.5, "USD"), "USD 1,250.50");
        assert_eq!(format_amount(999.0, ""), "999");
        assert_eq!(format_amount(-1_000_000.0, ""), "-1,000,000");
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_date(Some("2024-03-05T14:30:00Z")), "2024-03-05");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_timestamp("2024-03-05T14:30:00Z"), "2024-03-05 at 14:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3]);
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 10), vec![8, 9, 10]);
        assert_eq!(page_window(1, 0), vec![1]);
    }

    #[test]
    fn test_agent_options() {
        let options = agent_options(vec![
            json!({"id": 1, "first_name": "Sara", "last_name": "Ali"}),
            json!({"id": 2, "username": "omar"}),
            json!({"username": "ghost"}),
        ]);
        assert_eq!(
            options,
            vec![
                AgentOption { id: "1".into(), name: "Sara Ali".into() },
                AgentOption { id: "2".into(), name: "omar".into() },
            ]
        );
    }

    #[test]
    fn test_traffic_label_falls_back_to_raw() {
        assert_eq!(traffic_label(None), "-");
        assert_eq!(traffic_label(Some("billboard")), "billboard");
    }
}
