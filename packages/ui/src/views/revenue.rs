//! Recording deals against converted leads, and the agent revenue screen.

use api::models::deal::CURRENCIES;
use api::models::{Deal, DealDraft, RevenueStats};
use dioxus::prelude::*;

use super::common::{format_amount, format_date, ErrorState, LoadingState, PageHeader, StatCard};
use crate::context::use_api;
use crate::icons::*;
use crate::modal::{ConfirmDialog, ModalOverlay};
use crate::toast::use_toasts;
use crate::Icon;

/// Create a deal for `lead_id`, or edit `deal` when given.
#[component]
pub fn DealModal(
    lead_id: String,
    lead_name: String,
    #[props(default)] deal: Option<Deal>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<Deal>,
) -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let editing_id = deal.as_ref().and_then(|d| d.id.clone());
    let is_edit = editing_id.is_some();

    let initial = match &deal {
        Some(d) => DealDraft::from_deal(lead_id.clone(), d),
        None => DealDraft::new(lead_id.clone()),
    };
    let mut draft = use_signal(move || initial);
    let mut saving = use_signal(|| false);

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let currency = draft.read().currency.clone();
    let preview = draft
        .read()
        .commission_preview()
        .map(|commission| format!("{commission:.2} {currency}"));

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let payload = match draft.read().validate() {
            Ok(payload) => payload,
            Err(e) => {
                toasts.error(e.to_string());
                return;
            }
        };
        let client = client.clone();
        let editing_id = editing_id.clone();
        saving.set(true);
        spawn(async move {
            let result = match editing_id.as_deref() {
                Some(id) => api::deals::update(&client, id, &payload).await,
                None => api::deals::create(&client, &payload).await,
            };
            saving.set(false);
            match result {
                Ok(deal) => {
                    toasts.success(if editing_id.is_some() {
                        "Deal updated successfully!"
                    } else {
                        "Revenue recorded successfully!"
                    });
                    on_saved.call(deal);
                }
                Err(e) => {
                    tracing::error!("saving deal failed: {e}");
                    toasts.error(e.user_message("Failed to save revenue information"));
                }
            }
        });
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            class: "modal-card modal-wide",
            div {
                class: "modal-header",
                h2 {
                    class: "modal-title",
                    Icon { icon: FaSackDollar, width: 18, height: 18 }
                    if is_edit { " Edit Deal" } else { " Record Revenue" }
                }
                button {
                    class: "icon-btn",
                    title: "Close",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaXmark, width: 16, height: 16 }
                }
            }
            form {
                class: "form-grid",
                onsubmit: on_submit,
                label {
                    class: "form-field",
                    span { class: "form-label", "Revenue Amount " span { class: "required", "*" } }
                    input {
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        placeholder: "0.00",
                        value: "{draft.read().revenue_amount}",
                        oninput: move |evt| draft.write().revenue_amount = evt.value(),
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Currency " span { class: "required", "*" } }
                    select {
                        value: "{currency}",
                        onchange: move |evt| draft.write().currency = evt.value(),
                        for (code, label) in CURRENCIES {
                            option { key: "{code}", value: "{code}", selected: currency == code, "{label}" }
                        }
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Closed Date " span { class: "required", "*" } }
                    input {
                        r#type: "date",
                        max: "{today}",
                        value: "{draft.read().closed_date}",
                        oninput: move |evt| draft.write().closed_date = evt.value(),
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Commission Rate (%)" }
                    input {
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        max: "100",
                        placeholder: "0.00",
                        value: "{draft.read().commission_rate}",
                        oninput: move |evt| draft.write().commission_rate = evt.value(),
                    }
                    span { class: "form-hint", "Optional: Leave empty if not applicable" }
                }

                if let Some(commission) = preview {
                    div {
                        class: "callout callout-success form-span",
                        span { "Commission Amount:" }
                        strong { "{commission}" }
                    }
                }

                div {
                    class: "callout form-span",
                    span { "Lead" }
                    strong { "{lead_name}" }
                }

                div {
                    class: "modal-actions form-span",
                    button {
                        r#type: "button",
                        class: "btn btn-outline",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: saving(),
                        if saving() { "Saving..." } else if is_edit { "Update Deal" } else { "Record Revenue" }
                    }
                }
            }
        }
    }
}

#[derive(Clone, PartialEq)]
enum DealAction {
    Edit(Deal),
    Delete(Deal),
}

/// Revenue statistics and deals of the signed-in agent.
#[component]
pub fn AgentRevenuePage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let mut reload = use_signal(|| 0u32);
    let mut action = use_signal(|| None::<DealAction>);
    let mut deleting = use_signal(|| false);

    let stats_client = client.clone();
    let stats = use_resource(move || {
        let client = stats_client.clone();
        let _ = reload();
        async move {
            api::deals::revenue_stats(&client).await.map_err(|e| {
                tracing::error!("loading revenue statistics failed: {e}");
                e.user_message("Failed to load revenue statistics")
            })
        }
    });

    let deals_client = client.clone();
    let deals = use_resource(move || {
        let client = deals_client.clone();
        let _ = reload();
        async move {
            api::deals::list(&client, Vec::new()).await.unwrap_or_else(|e| {
                tracing::warn!("loading deals failed: {e}");
                Vec::new()
            })
        }
    });

    let stats_value = stats.read().clone();
    let deal_rows = deals.read().clone().unwrap_or_default();
    let pending_delete = match action() {
        Some(DealAction::Delete(deal)) => Some(deal),
        _ => None,
    };
    let pending_edit = match action() {
        Some(DealAction::Edit(deal)) => Some(deal),
        _ => None,
    };

    let confirm_delete = move |_| {
        let Some(DealAction::Delete(deal)) = action() else {
            return;
        };
        let Some(id) = deal.id.clone() else {
            action.set(None);
            return;
        };
        let client = client.clone();
        deleting.set(true);
        spawn(async move {
            match api::deals::delete(&client, &id).await {
                Ok(_) => {
                    toasts.success("Deal deleted successfully");
                    reload += 1;
                }
                Err(e) => {
                    tracing::error!("deleting deal {id} failed: {e}");
                    toasts.error(e.user_message("Failed to delete deal"));
                }
            }
            deleting.set(false);
            action.set(None);
        });
    };

    rsx! {
        PageHeader {
            title: "My Revenue Dashboard",
            subtitle: "Closed deals, commission and monthly performance",
            button {
                class: "btn btn-outline",
                onclick: move |_| reload += 1,
                Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                " Refresh"
            }
        }

        {match stats_value {
            None => rsx! { LoadingState { message: "Loading revenue..." } },
            Some(Err(message)) => rsx! {
                ErrorState { message, on_retry: move |_| reload += 1 }
            },
            Some(Ok(stats)) => rsx! { RevenueSummary { stats } },
        }}

        section {
            class: "panel",
            h3 { class: "section-title", "Deals" }
            if deal_rows.is_empty() {
                div {
                    class: "empty-state",
                    h3 { "No Deals Yet" }
                    p { "Revenue appears here once you record a deal for a converted lead." }
                }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Lead" }
                            th { "Revenue" }
                            th { "Commission" }
                            th { "Closed" }
                            th { class: "actions-col", "Actions" }
                        }
                    }
                    tbody {
                        for deal in deal_rows {
                            DealRow {
                                key: "{deal.id.clone().unwrap_or_default()}",
                                deal: deal.clone(),
                                on_edit: move |d| action.set(Some(DealAction::Edit(d))),
                                on_delete: move |d| action.set(Some(DealAction::Delete(d))),
                            }
                        }
                    }
                }
            }
        }

        if let Some(deal) = pending_edit {
            DealModal {
                lead_id: deal.lead.clone().unwrap_or_default(),
                lead_name: deal.lead_name.clone().unwrap_or_else(|| "-".to_string()),
                deal: deal.clone(),
                on_close: move |_| action.set(None),
                on_saved: move |_| {
                    action.set(None);
                    reload += 1;
                },
            }
        }
        if let Some(deal) = pending_delete {
            ConfirmDialog {
                title: "Delete Deal",
                message: format!(
                    "Delete the {} deal for {}? This action cannot be undone.",
                    format_amount(deal.revenue_amount, &deal.currency),
                    deal.lead_name.clone().unwrap_or_else(|| "this lead".to_string())
                ),
                confirm_label: "Delete",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| action.set(None),
            }
        }
    }
}

#[component]
fn DealRow(deal: Deal, on_edit: EventHandler<Deal>, on_delete: EventHandler<Deal>) -> Element {
    let commission = match deal.commission_amount {
        Some(amount) => format_amount(amount, &deal.currency),
        None => "-".to_string(),
    };
    let lead = deal
        .lead_name
        .clone()
        .or_else(|| deal.lead_email.clone())
        .unwrap_or_else(|| format!("Lead #{}", deal.lead.clone().unwrap_or_default()));
    let edit_deal = deal.clone();
    let delete_deal = deal.clone();

    rsx! {
        tr {
            td { "{lead}" }
            td { class: "amount", "{format_amount(deal.revenue_amount, &deal.currency)}" }
            td { "{commission}" }
            td { "{format_date(deal.closed_date.as_deref())}" }
            td {
                class: "actions-col",
                button {
                    class: "icon-btn",
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit_deal.clone()),
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                button {
                    class: "icon-btn danger",
                    title: "Delete",
                    onclick: move |_| on_delete.call(delete_deal.clone()),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn RevenueSummary(stats: RevenueStats) -> Element {
    let peak = stats
        .revenue_by_month
        .iter()
        .map(|m| m.revenue)
        .fold(0.0_f64, f64::max);
    let months: Vec<(String, String, String, String)> = stats
        .revenue_by_month
        .iter()
        .map(|m| {
            let width = if peak > 0.0 { m.revenue / peak * 100.0 } else { 0.0 };
            (
                m.month.clone(),
                format_amount(m.revenue, ""),
                format!("{} deals", m.deals),
                format!("width: {width:.1}%"),
            )
        })
        .collect();

    rsx! {
        div {
            class: "stat-grid",
            StatCard { label: "Total Revenue", value: format_amount(stats.total_revenue, "AED") }
            StatCard { label: "Total Commission", value: format_amount(stats.total_commission, "AED") }
            StatCard { label: "Converted Leads", value: stats.converted_leads_count.to_string() }
            StatCard { label: "Average Deal Value", value: format_amount(stats.average_deal_value(), "AED") }
        }

        section {
            class: "panel",
            h3 { class: "section-title", "Revenue by Month" }
            if months.is_empty() {
                p { class: "muted", "No revenue recorded yet." }
            } else {
                ul {
                    class: "bar-list",
                    for (month, revenue, deals, width) in months {
                        li {
                            key: "{month}",
                            span { class: "bar-label", "{month}" }
                            div {
                                class: "bar-track",
                                div { class: "bar-fill", style: "{width}" }
                            }
                            span { class: "bar-value", "{revenue}" }
                            span { class: "bar-hint", "{deals}" }
                        }
                    }
                }
            }
        }
    }
}
