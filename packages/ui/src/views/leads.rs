//! Admin lead management: server-side pages, filters, edit, delete and notes.

use api::leads::LeadQuery;
use api::models::{Lead, LeadStatus};
use api::resource;
use api::{CrudApi, ResourceApi};
use dioxus::prelude::*;
use store::TrafficSource;

use super::common::{
    agent_options, format_amount, format_date, traffic_label, AgentOption, ErrorState,
    LoadingState, NotesTimeline, PageHeader, Pagination, StatusBadge,
};
use super::revenue::DealModal;
use crate::context::use_api;
use crate::icons::*;
use crate::modal::{ConfirmDialog, ModalOverlay};
use crate::toast::use_toasts;
use crate::Icon;

/// What the row action opened.
#[derive(Clone, PartialEq)]
pub(crate) enum LeadDialog {
    Timeline(Lead),
    Edit(Lead),
    Delete(Lead),
    Revenue(Lead),
}

/// Status filter and pagination controls shared by both lead screens.
#[component]
pub(crate) fn LeadFilters(
    mut query: Signal<LeadQuery>,
    statuses: Vec<LeadStatus>,
    #[props(default)] agents: Option<Vec<AgentOption>>,
) -> Element {
    let mut search = use_signal(|| query.peek().search.clone());
    let current = query();

    let mut apply_search = move || {
        let term = search();
        let mut q = query.write();
        q.search = term;
        q.page = 1;
    };

    rsx! {
        div {
            class: "filter-bar",
            form {
                class: "search-box",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    apply_search();
                },
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                input {
                    r#type: "search",
                    placeholder: "Search name, email or phone...",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
            }
            select {
                value: "{current.status}",
                onchange: move |evt| {
                    let mut q = query.write();
                    q.status = evt.value();
                    q.page = 1;
                },
                option { value: "", "All Statuses" }
                for status in statuses {
                    option {
                        key: "{status.as_str()}",
                        value: "{status.as_str()}",
                        selected: current.status == status.as_str(),
                        "{status.label()}"
                    }
                }
            }
            if let Some(agents) = agents {
                select {
                    value: "{current.agent}",
                    onchange: move |evt| {
                        let mut q = query.write();
                        q.agent = evt.value();
                        q.page = 1;
                    },
                    option { value: "", "All Agents" }
                    for agent in agents {
                        option {
                            key: "{agent.id}",
                            value: "{agent.id}",
                            selected: current.agent == agent.id,
                            "{agent.name}"
                        }
                    }
                }
            }
            select {
                value: "{current.traffic_source}",
                onchange: move |evt| {
                    let mut q = query.write();
                    q.traffic_source = evt.value();
                    q.page = 1;
                },
                option { value: "", "All Sources" }
                for source in TrafficSource::ALL {
                    option {
                        key: "{source.as_str()}",
                        value: "{source.as_str()}",
                        selected: current.traffic_source == source.as_str(),
                        "{source.label()}"
                    }
                }
            }
            button {
                class: "btn btn-outline",
                onclick: move |_| {
                    search.set(String::new());
                    let cleared = query.peek().cleared();
                    query.set(cleared);
                },
                "Clear"
            }
        }
    }
}

#[component]
pub fn LeadsPage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let mut query = use_signal(LeadQuery::default);
    let mut reload = use_signal(|| 0u32);
    let mut dialog = use_signal(|| None::<LeadDialog>);
    let mut deleting = use_signal(|| false);

    let list_client = client.clone();
    let leads = use_resource(move || {
        let client = list_client.clone();
        let q = query();
        let _ = reload();
        async move {
            api::leads::list(&client, &q).await.map_err(|e| {
                tracing::error!("loading leads failed: {e}");
                toasts.error("Failed to fetch leads");
                e.user_message("Failed to fetch leads")
            })
        }
    });

    let agents_client = client.clone();
    let agents = use_resource(move || {
        let agents_api = ResourceApi::new(agents_client.clone(), resource::AGENTS);
        async move {
            match agents_api.get_all().await {
                Ok(value) => agent_options(api::normalize_list(value)),
                Err(e) => {
                    tracing::warn!("loading agents failed: {e}");
                    Vec::new()
                }
            }
        }
    });

    let agent_list = agents.read().clone().unwrap_or_default();
    let current = query();
    let page = leads.read().clone();

    let confirm_delete = move |_| {
        let Some(LeadDialog::Delete(lead)) = dialog() else {
            return;
        };
        let Some(id) = lead.id.clone() else {
            dialog.set(None);
            return;
        };
        let client = client.clone();
        deleting.set(true);
        spawn(async move {
            match api::leads::delete(&client, &id).await {
                Ok(()) => {
                    toasts.success("Lead deleted successfully");
                    reload += 1;
                }
                Err(e) => {
                    tracing::error!("deleting lead {id} failed: {e}");
                    toasts.error("Failed to delete lead");
                }
            }
            deleting.set(false);
            dialog.set(None);
        });
    };

    rsx! {
        PageHeader {
            title: "Leads",
            subtitle: "Every enquiry from the website, with its agent and status",
            button {
                class: "btn btn-outline",
                onclick: move |_| reload += 1,
                Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                " Refresh"
            }
        }

        LeadFilters {
            query,
            statuses: LeadStatus::ADMIN_OPTIONS.to_vec(),
            agents: agent_list.clone(),
        }

        {match page {
            None => rsx! { LoadingState { message: "Loading leads..." } },
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
                                th { "Agent" }
                                th { "Source" }
                                th { "Revenue" }
                                th { "Received" }
                                th { class: "actions-col", "Actions" }
                            }
                        }
                        tbody {
                            if page.results.is_empty() {
                                tr {
                                    td { colspan: "7", class: "empty-row", "No leads found" }
                                }
                            }
                            for lead in page.results.clone() {
                                AdminLeadRow {
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
            None => rsx! {},
            Some(LeadDialog::Timeline(lead)) => rsx! {
                NotesTimeline { lead, on_close: move |_| dialog.set(None) }
            },
            Some(LeadDialog::Edit(lead)) => rsx! {
                LeadEditModal {
                    lead,
                    agents: agent_list.clone(),
                    on_close: move |_| dialog.set(None),
                    on_saved: move |_| {
                        dialog.set(None);
                        reload += 1;
                    },
                }
            },
            Some(LeadDialog::Delete(lead)) => rsx! {
                ConfirmDialog {
                    title: "Delete Lead",
                    message: format!(
                        "Are you sure you want to delete {}? This action cannot be undone.",
                        lead.display_name()
                    ),
                    confirm_label: "Delete",
                    busy: deleting(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| dialog.set(None),
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
        }}
    }
}

/// Deal amount, an "Add Revenue" button for converted leads, or a hint.
#[component]
pub(crate) fn DealCell(lead: Lead, on_open: EventHandler<LeadDialog>) -> Element {
    let amount = lead
        .deal
        .as_ref()
        .map(|deal| format_amount(deal.revenue_amount, &deal.currency));
    match (amount, lead.status) {
        (Some(amount), _) => {
            rsx! {
                button {
                    class: "link-btn amount",
                    title: "Edit Deal",
                    onclick: move |_| on_open.call(LeadDialog::Revenue(lead.clone())),
                    "{amount}"
                }
            }
        }
        (None, LeadStatus::Converted) => rsx! {
            button {
                class: "link-btn",
                title: "Add Revenue",
                onclick: move |_| on_open.call(LeadDialog::Revenue(lead.clone())),
                Icon { icon: FaSackDollar, width: 12, height: 12 }
                " Add Revenue"
            }
        },
        _ => rsx! {
            span { class: "muted", "Not converted" }
        },
    }
}

#[component]
fn AdminLeadRow(lead: Lead, on_open: EventHandler<LeadDialog>) -> Element {
    let phone = lead.phone.clone().unwrap_or_else(|| "-".to_string());
    let (timeline, edit, delete) = (lead.clone(), lead.clone(), lead.clone());

    rsx! {
        tr {
            td {
                div { class: "cell-title", "{lead.display_name()}" }
                div { class: "cell-sub", "{lead.email}" }
                div { class: "cell-sub", "{phone}" }
            }
            td { StatusBadge { status: lead.status } }
            td { "{lead.agent_name()}" }
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
                button {
                    class: "icon-btn",
                    title: "Edit",
                    onclick: move |_| on_open.call(LeadDialog::Edit(edit.clone())),
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                button {
                    class: "icon-btn danger",
                    title: "Delete",
                    onclick: move |_| on_open.call(LeadDialog::Delete(delete.clone())),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                }
            }
        }
    }
}

/// The admin select shows backend-only closed statuses as "Closed".
fn admin_select_value(status: LeadStatus) -> &'static str {
    if status.is_closed() {
        LeadStatus::Closed.as_str()
    } else {
        status.as_str()
    }
}

#[component]
fn LeadEditModal(
    lead: Lead,
    agents: Vec<AgentOption>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let original = lead.status;
    let mut status = use_signal(|| original);
    let mut agent = use_signal(|| lead.agent_id().unwrap_or_default().to_string());
    let mut note = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let id = lead.id.clone().unwrap_or_default();
    let selected = admin_select_value(status());

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let id = id.clone();
        saving.set(true);
        spawn(async move {
            let agent = agent();
            match api::leads::update(&client, &id, status(), Some(&agent), &note()).await {
                Ok(_) => {
                    toasts.success("Lead updated successfully");
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
                h2 { class: "modal-title", "Edit Lead" }
                button {
                    class: "icon-btn",
                    title: "Close",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaXmark, width: 16, height: 16 }
                }
            }
            p { class: "muted", "{lead.display_name()} · {lead.email}" }
            form {
                class: "form-stack",
                onsubmit: save,
                label {
                    class: "form-field",
                    span { class: "form-label", "Status" }
                    select {
                        value: "{selected}",
                        onchange: move |evt| {
                            let picked = LeadStatus::parse(&evt.value());
                            // Keep converted / closed_lost unless another status is picked.
                            if admin_select_value(original) != picked.as_str() {
                                status.set(picked);
                            } else {
                                status.set(original);
                            }
                        },
                        for choice in LeadStatus::ADMIN_OPTIONS {
                            option {
                                key: "{choice.as_str()}",
                                value: "{choice.as_str()}",
                                selected: selected == choice.as_str(),
                                "{choice.label()}"
                            }
                        }
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Assigned Agent" }
                    select {
                        value: "{agent}",
                        onchange: move |evt| agent.set(evt.value()),
                        option { value: "", "Unassigned" }
                        for choice in agents {
                            option {
                                key: "{choice.id}",
                                value: "{choice.id}",
                                selected: agent() == choice.id,
                                "{choice.name}"
                            }
                        }
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Add Note" }
                    textarea {
                        rows: "3",
                        placeholder: "Optional note for the activity history",
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
                        if saving() { "Saving..." } else { "Save Changes" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_closed_statuses_select_as_closed() {
        assert_eq!(admin_select_value(LeadStatus::Converted), "closed");
        assert_eq!(admin_select_value(LeadStatus::ClosedLost), "closed");
        assert_eq!(admin_select_value(LeadStatus::Contacted), "contacted");
    }
}
