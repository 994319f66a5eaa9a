//! Leads assigned to the signed-in agent.
//!
//! Agents move a lead forward only (see [`LeadStatus::agent_transitions`]) and
//! add activity comments; closed leads are read-only.

use api::leads::{AgentLeadUpdate, LeadQuery};
use api::models::{Lead, LeadStatus};
use dioxus::prelude::*;

use super::common::{
    format_date, traffic_label, ErrorState, LoadingState, NotesTimeline, PageHeader, Pagination,
    StatusBadge,
};
use super::leads::{DealCell, LeadDialog, LeadFilters};
use super::revenue::DealModal;
use crate::context::use_api;
use crate::icons::*;
use crate::modal::ModalOverlay;
use crate::toast::use_toasts;
use crate::Icon;

#[component]
pub fn AgentLeadsPage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let mut query = use_signal(LeadQuery::default);
    let mut reload = use_signal(|| 0u32);
    let mut dialog = use_signal(|| None::<LeadDialog>);

    let leads = use_resource(move || {
        let client = client.clone();
        let q = query();
        let _ = reload();
        async move {
            api::leads::agent_list(&client, &q).await.map_err(|e| {
                tracing::error!("loading agent leads failed: {e}");
                toasts.error("Failed to fetch your leads");
                e.user_message("Failed to fetch your leads")
            })
        }
    });

    let current = query();
    let page = leads.read().clone();

    rsx! {
        PageHeader {
            title: "My Leads",
            subtitle: "Follow up, log activity and record revenue",
            button {
                class: "btn btn-outline",
                onclick: move |_| reload += 1,
                Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                " Refresh"
            }
        }

        LeadFilters { query, statuses: LeadStatus::AGENT_OPTIONS.to_vec() }

        {match page {
            None => rsx! { LoadingState { message: "Loading your leads..." } },
            Some(Err(message)) => rsx! {
                ErrorState { message, on_retry: move |_| reload += 1 }
            },
            Some(Ok(page)) => rsx! {
                div {
                    class: "table-card",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Lead" }
                                th { "Status" }
                                th { "Last Note" }
                                th { "Source" }
                                th { "Revenue" }
                                th { "Received" }
                                th { class: "actions-col", "Actions" }
                            }
                        }
                        tbody {
                            if page.results.is_empty() {
                                tr {
                                    td { colspan: "7", class: "empty-row", "No leads assigned to you yet" }
                                }
                            }
                            for lead in page.results.clone() {
                                AgentLeadRow {
                                    key: "{lead.id.clone().unwrap_or_default()}",
                                    lead: lead.clone(),
                                    on_open: move |d| dialog.set(Some(d)),
                                }
                            }
                        }
                    }
                }
                if page.count > current.page_size {
                    Pagination {
                        page: current.page,
                        page_size: current.page_size,
                        count: page.count,
                        on_page: move |n| query.write().page = n,
                        on_page_size: move |size| {
                            let mut q = query.write();
                            q.page_size = size;
                            q.page = 1;
                        },
                    }
                }
            },
        }}

        {match dialog() {
            Some(LeadDialog::Timeline(lead)) => rsx! {
                NotesTimeline { lead, on_close: move |_| dialog.set(None) }
            },
            Some(LeadDialog::Edit(lead)) => rsx! {
                AgentLeadModal {
                    lead,
                    on_close: move |_| dialog.set(None),
                    on_saved: move |_| {
                        dialog.set(None);
                        reload += 1;
                    },
                }
            },
            Some(LeadDialog::Revenue(lead)) => rsx! {
                DealModal {
                    lead_id: lead.id.clone().unwrap_or_default(),
                    lead_name: lead.display_name(),
                    deal: lead.deal.clone(),
                    on_close: move |_| dialog.set(None),
                    on_saved: move |_| {
                        dialog.set(None);
                        reload += 1;
                    },
                }
            },
            // Agents cannot delete leads
            Some(LeadDialog::Delete(_)) | None => rsx! {},
        }}
    }
}

#[component]
fn AgentLeadRow(lead: Lead, on_open: EventHandler<LeadDialog>) -> Element {
    let last_note = lead
        .last_note()
        .map(|n| n.note.clone())
        .unwrap_or_else(|| "No notes yet".to_string());
    let closed = lead.status.is_closed();
    let (timeline, edit) = (lead.clone(), lead.clone());

    rsx! {
        tr {
            td {
                div { class: "cell-title", "{lead.display_name()}" }
                div { class: "cell-sub", "{lead.email}" }
                if let Some(phone) = lead.phone.as_deref() {
                    div { class: "cell-sub", "{phone}" }
                }
            }
            td { StatusBadge { status: lead.status } }
            td { class: "cell-clamp", "{last_note}" }
            td { "{traffic_label(lead.traffic_source.as_deref())}" }
            td { DealCell { lead: lead.clone(), on_open } }
            td { "{format_date(lead.created_at.as_deref())}" }
            td {
                class: "actions-col",
                button {
                    class: "icon-btn",
                    title: "View Details & Notes",
                    onclick: move |_| on_open.call(LeadDialog::Timeline(timeline.clone())),
                    Icon { icon: FaEye, width: 14, height: 14 }
                }
                if !closed {
                    button {
                        class: "icon-btn",
                        title: "Add Comment",
                        onclick: move |_| on_open.call(LeadDialog::Edit(edit.clone())),
                        Icon { icon: FaPen, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}

#[component]
fn AgentLeadModal(lead: Lead, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let current = lead.status;
    let mut selected = use_signal(|| current);
    let mut note = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let id = lead.id.clone().unwrap_or_default();
    let choices = current.agent_transitions();

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let update = AgentLeadUpdate::diff(current, selected(), &note());
        if update.is_empty() {
            toasts.info("No changes to save");
            on_close.call(());
            return;
        }
        let client = client.clone();
        let id = id.clone();
        saving.set(true);
        spawn(async move {
            match api::leads::agent_update(&client, &id, &update).await {
                Ok(_) => {
                    toasts.success(update.success_message());
                    on_saved.call(());
                }
                Err(e) => {
                    tracing::error!("updating lead {id} failed: {e}");
                    toasts.error(e.user_message("Failed to update lead"));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-header",
                h2 { class: "modal-title", "Update Lead" }
                button {
                    class: "icon-btn",
                    title: "Close",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaXmark, width: 16, height: 16 }
                }
            }
            p { class: "muted", "{lead.display_name()}" }
            form {
                class: "form-stack",
                onsubmit: save,
                label {
                    class: "form-field",
                    span { class: "form-label", "Status" }
                    select {
                        value: "{selected().as_str()}",
                        disabled: choices.len() < 2,
                        onchange: move |evt| selected.set(LeadStatus::parse(&evt.value())),
                        for choice in choices {
                            option {
                                key: "{choice.as_str()}",
                                value: "{choice.as_str()}",
                                selected: selected() == *choice,
                                "{choice.label()}"
                            }
                        }
                    }
                    if choices.len() < 2 {
                        span { class: "form-hint", "This lead cannot move further from here." }
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Add Comment" }
                    textarea {
                        rows: "4",
                        placeholder: "What happened on this lead?",
                        value: "{note}",
                        oninput: move |evt| note.set(evt.value()),
                    }
                }
                div {
                    class: "modal-actions",
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
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}
