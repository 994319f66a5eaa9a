use std::rc::Rc;

use api::{record_id, ApiError, CrudApi};
use dioxus::prelude::*;
use serde_json::Value;

use super::actions::{self, Saved, SubmitError};
use super::descriptor::{Column, FieldKind, FormField};
use super::form::{FieldErrors, FieldValue, FileUpload, FormData};
use super::list::{filter_rows, media_url, record_label, render_cell, singular, Cell};
use crate::context::use_media_origin;
use crate::icons::{FaArrowsRotate, FaMagnifyingGlass, FaPen, FaPlus, FaTrashCan};
use crate::modal::{ConfirmDialog, ModalOverlay};
use crate::toast::{use_toasts, Toasts};
use crate::Icon;

const CRUD_CSS: Asset = asset!("/assets/styling/crud.css");

/// A [`CrudApi`] as a component prop. Two handles are equal when they point
/// at the same instance.
#[derive(Clone)]
pub struct CrudHandle(pub Rc<dyn CrudApi>);

impl CrudHandle {
    pub fn new(api: impl CrudApi + 'static) -> Self {
        Self(Rc::new(api))
    }
}

impl PartialEq for CrudHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

/// Generic list + form screen over one REST collection.
#[component]
pub fn CrudManager(
    title: String,
    api: CrudHandle,
    columns: Vec<Column>,
    form_fields: Vec<FormField>,
    #[props(default)] empty_message: Option<String>,
) -> Element {
    let toasts = use_toasts();
    let media_origin = use_media_origin();

    let mut rows = use_signal(Vec::<Value>::new);
    let mut loading = use_signal(|| true);
    let mut load_error = use_signal(|| None::<String>);
    let mut search = use_signal(String::new);
    let mut form_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<Value>);
    let mut form_data = use_signal(FormData::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut submitting = use_signal(|| false);
    let mut pending_delete = use_signal(|| None::<Value>);
    let mut deleting = use_signal(|| false);

    let singular = singular(&title);

    let load_api = api.clone();
    let refresh = use_callback(move |_: ()| {
        let api = load_api.clone();
        loading.set(true);
        spawn(async move {
            let result = actions::load(api.0.as_ref()).await;
            apply_rows(rows, load_error, toasts, result);
            loading.set(false);
        });
    });
    use_hook(move || refresh.call(()));

    let create_fields = form_fields.clone();
    let open_create = move |_| {
        editing.set(None);
        form_data.set(FormData::empty(&create_fields));
        errors.set(FieldErrors::new());
        form_open.set(true);
    };

    let submit_api = api.clone();
    let submit_fields = form_fields.clone();
    let submit_origin = media_origin.clone();
    let submit_singular = singular.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let api = submit_api.clone();
        let fields = submit_fields.clone();
        let origin = submit_origin.clone();
        let singular = submit_singular.clone();
        submitting.set(true);
        spawn(async move {
            let record = editing();
            let data = form_data();
            match actions::save(api.0.as_ref(), &fields, &data, record.as_ref(), &origin, &singular).await {
                Ok(Saved { message, rows: list }) => {
                    toasts.success(message);
                    errors.set(FieldErrors::new());
                    form_open.set(false);
                    apply_rows(rows, load_error, toasts, list);
                }
                Err(SubmitError::Invalid(field_errors)) => errors.set(field_errors),
                Err(SubmitError::Api(e)) => {
                    tracing::error!("failed to save {singular}: {e}");
                    toasts.error(e.user_message("Operation failed"));
                }
            }
            submitting.set(false);
        });
    };

    let delete_api = api.clone();
    let delete_singular = singular.clone();
    let on_confirm_delete = move |_| {
        let Some(record) = pending_delete() else {
            return;
        };
        let api = delete_api.clone();
        let singular = delete_singular.clone();
        deleting.set(true);
        spawn(async move {
            match actions::remove(api.0.as_ref(), &record, &singular).await {
                Ok(Saved { message, rows: list }) => {
                    toasts.success(message);
                    apply_rows(rows, load_error, toasts, list);
                }
                Err(e) => {
                    tracing::error!("failed to delete {singular}: {e}");
                    toasts.error("Delete failed");
                }
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let visible = filter_rows(&rows.read(), &columns, &search());
    let empty_text = empty_message
        .clone()
        .unwrap_or_else(|| format!("No {} found", title.to_lowercase()));
    let is_editing = editing().is_some();
    let form_rows: Vec<_> = form_fields
        .iter()
        .map(|field| {
            (
                field.name,
                field.clone(),
                form_data.read().get(field.name).clone(),
                errors.read().get(field.name).cloned(),
            )
        })
        .collect();
    let table_rows: Vec<_> = visible
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let key = record_id(&record).unwrap_or_else(|| format!("row-{index}"));
            (key, record)
        })
        .collect();
    let delete_message = pending_delete().map(|record| {
        format!(
            "Are you sure you want to delete \"{}\"? This cannot be undone.",
            record_label(&record, &singular)
        )
    });
    let form_title = if is_editing {
        format!("Edit {singular}")
    } else {
        format!("Add {singular}")
    };

    rsx! {
        document::Stylesheet { href: CRUD_CSS }

        div {
            class: "crud-manager",
            div {
                class: "crud-header",
                h1 { class: "crud-title", "{title}" }
                div {
                    class: "crud-toolbar",
                    div {
                        class: "crud-search",
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                        input {
                            r#type: "text",
                            placeholder: "Search...",
                            value: search(),
                            oninput: move |evt: FormEvent| search.set(evt.value()),
                        }
                    }
                    button {
                        class: "btn btn-outline",
                        title: "Refresh",
                        disabled: loading(),
                        onclick: move |_| refresh.call(()),
                        Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: open_create,
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        " Add {singular}"
                    }
                }
            }

            if let Some(error) = load_error() {
                div { class: "crud-error", "{error}" }
            }

            if loading() && rows.read().is_empty() {
                div { class: "crud-loading", "Loading..." }
            } else if table_rows.is_empty() {
                div { class: "crud-empty", "{empty_text}" }
            } else {
                table {
                    class: "crud-table",
                    thead {
                        tr {
                            for column in columns.iter() {
                                th { key: "{column.key}", "{column.label}" }
                            }
                            th { class: "crud-actions-col", "Actions" }
                        }
                    }
                    tbody {
                        for (key, record) in table_rows {
                            CrudRow {
                                key: "{key}",
                                record,
                                columns: columns.clone(),
                                media_origin: media_origin.clone(),
                                on_edit: {
                                    let fields = form_fields.clone();
                                    move |record: Value| {
                                        form_data.set(FormData::from_item(&fields, &record));
                                        editing.set(Some(record));
                                        errors.set(FieldErrors::new());
                                        form_open.set(true);
                                    }
                                },
                                on_delete: move |record: Value| pending_delete.set(Some(record)),
                            }
                        }
                    }
                }
            }
        }

        if form_open() {
            ModalOverlay {
                on_close: move |_| form_open.set(false),
                class: "modal-card modal-wide",
                form {
                    class: "crud-form",
                    onsubmit: on_submit,
                    h2 { class: "modal-title", "{form_title}" }
                    for (name, field, value, error) in form_rows {
                        FieldInput {
                            key: "{name}",
                            field,
                            value,
                            error,
                            editing: is_editing,
                            on_change: move |value: FieldValue| form_data.write().set(name, value),
                        }
                    }
                    div {
                        class: "modal-actions",
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            onclick: move |_| form_open.set(false),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: submitting(),
                            if submitting() { "Saving..." } else { "Save" }
                        }
                    }
                }
            }
        }

        if let Some(message) = delete_message {
            ConfirmDialog {
                title: "Delete {singular}",
                message,
                confirm_label: "Delete",
                busy: deleting(),
                on_confirm: on_confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

fn apply_rows(
    mut rows: Signal<Vec<Value>>,
    mut load_error: Signal<Option<String>>,
    toasts: Toasts,
    result: Result<Vec<Value>, ApiError>,
) {
    match result {
        Ok(list) => {
            rows.set(list);
            load_error.set(None);
        }
        Err(e) => {
            tracing::error!("failed to load records: {e}");
            load_error.set(Some("Failed to load data".to_string()));
            toasts.error("Could not fetch records");
        }
    }
}

#[component]
fn CrudRow(
    record: Value,
    columns: Vec<Column>,
    media_origin: String,
    on_edit: EventHandler<Value>,
    on_delete: EventHandler<Value>,
) -> Element {
    let edit_record = record.clone();
    let delete_record = record.clone();

    rsx! {
        tr {
            for column in columns.iter() {
                td {
                    key: "{column.key}",
                    {match render_cell(&record, column, &media_origin) {
                        Cell::Text(text) => rsx! { "{text}" },
                        Cell::Badge(text) => rsx! { span { class: "badge", "{text}" } },
                        Cell::Boolean(true) => rsx! { span { class: "badge badge-yes", "Yes" } },
                        Cell::Boolean(false) => rsx! { span { class: "badge badge-no", "No" } },
                        Cell::Image(Some(src)) => rsx! { img { class: "crud-thumb", src: "{src}", alt: "" } },
                        Cell::Image(None) => rsx! { "-" },
                    }}
                }
            }
            td {
                class: "crud-actions",
                button {
                    class: "icon-btn",
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit_record.clone()),
                    Icon { icon: FaPen, width: 13, height: 13 }
                }
                button {
                    class: "icon-btn danger",
                    title: "Delete",
                    onclick: move |_| on_delete.call(delete_record.clone()),
                    Icon { icon: FaTrashCan, width: 13, height: 13 }
                }
            }
        }
    }
}

/// One labelled form control, chosen by the field kind.
#[component]
pub fn FieldInput(
    field: FormField,
    value: FieldValue,
    error: Option<String>,
    #[props(default = false)] editing: bool,
    on_change: EventHandler<FieldValue>,
) -> Element {
    let media_origin = use_media_origin();
    let id = format!("field-{}", field.name);
    let required = field.required && !(editing && field.kind == FieldKind::Password);
    let placeholder = field.placeholder.unwrap_or_default();
    let text = value.as_text().to_string();

    let control = match field.kind {
        FieldKind::Textarea => rsx! {
            textarea {
                id: "{id}",
                rows: 4,
                placeholder,
                readonly: field.read_only,
                value: "{text}",
                oninput: move |evt: FormEvent| on_change.call(FieldValue::Text(evt.value())),
            }
        },
        FieldKind::Select => rsx! {
            select {
                id: "{id}",
                disabled: field.read_only,
                value: "{text}",
                onchange: move |evt: FormEvent| on_change.call(FieldValue::Text(evt.value())),
                option { value: "", "Select {field.label}" }
                for opt in field.options.iter() {
                    option {
                        key: "{opt.value}",
                        value: "{opt.value}",
                        selected: opt.value == text,
                        "{opt.label}"
                    }
                }
            }
        },
        FieldKind::MultiSelect => {
            let selected = value.as_list().to_vec();
            rsx! {
                div {
                    class: "multi-select",
                    for opt in field.options.iter().cloned() {
                        label {
                            key: "{opt.value}",
                            class: "multi-option",
                            input {
                                r#type: "checkbox",
                                disabled: field.read_only,
                                checked: selected.contains(&opt.value),
                                onchange: {
                                    let selected = selected.clone();
                                    let option = opt.value.clone();
                                    move |evt: FormEvent| {
                                        let mut items = selected.clone();
                                        items.retain(|item| *item != option);
                                        if evt.checked() {
                                            items.push(option.clone());
                                        }
                                        on_change.call(FieldValue::List(items));
                                    }
                                },
                            }
                            " {opt.label}"
                        }
                    }
                }
            }
        }
        FieldKind::Checkbox => rsx! {
            input {
                id: "{id}",
                r#type: "checkbox",
                disabled: field.read_only,
                checked: value.as_bool(),
                onchange: move |evt: FormEvent| on_change.call(FieldValue::Bool(evt.checked())),
            }
        },
        FieldKind::File => {
            let preview = match &value {
                FieldValue::File(upload) => Some(format!("Selected: {}", upload.file_name)),
                FieldValue::Text(url) if !url.is_empty() => Some(media_url(&media_origin, url)),
                _ => None,
            };
            let is_upload = matches!(value, FieldValue::File(_));
            rsx! {
                if let Some(preview) = preview {
                    if is_upload {
                        p { class: "file-name", "{preview}" }
                    } else {
                        a { class: "file-current", href: "{preview}", target: "_blank", "Current file" }
                    }
                }
                input {
                    id: "{id}",
                    r#type: "file",
                    accept: field.accept.unwrap_or_default(),
                    disabled: field.read_only,
                    onchange: move |evt: FormEvent| async move {
                        let Some(file) = evt.files().into_iter().next() else {
                            return;
                        };
                        let name = file.name();
                        match file.read_bytes().await {
                            Ok(bytes) => on_change.call(FieldValue::File(FileUpload::new(name, bytes.to_vec()))),
                            Err(e) => tracing::warn!("could not read {name}: {e:?}"),
                        }
                    },
                }
            }
        }
        kind => rsx! {
            input {
                id: "{id}",
                r#type: kind.input_type(),
                placeholder,
                readonly: field.read_only,
                autocomplete: if kind == FieldKind::Password { "new-password" } else { "off" },
                value: "{text}",
                oninput: move |evt: FormEvent| on_change.call(FieldValue::Text(evt.value())),
            }
        },
    };

    rsx! {
        div {
            class: if error.is_some() { "form-field has-error" } else { "form-field" },
            label {
                r#for: "{id}",
                "{field.label}"
                if required {
                    span { class: "required", " *" }
                }
            }
            {control}
            if let Some(ref error) = error {
                p { class: "field-error", "{error}" }
            }
        }
    }
}
