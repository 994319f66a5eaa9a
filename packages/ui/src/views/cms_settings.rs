use dioxus::prelude::*;
use store::Section;

use super::common::PageHeader;
use crate::cms::{save_settings, use_cms};
use crate::context::use_api;
use crate::toast::use_toasts;

/// Toggles for the public website sections.
#[component]
pub fn CmsSettingsPage() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let cms = use_cms();
    let mut draft = use_signal(|| cms.peek().data.clone());
    let mut saving = use_signal(|| false);

    // Pick up the fetched flags if they arrive after the page opened.
    use_effect(move || {
        if cms.read().loaded {
            draft.set(cms.peek().data.clone());
        }
    });

    let dirty = *draft.read() != cms.read().data;

    let save = move |_| {
        let client = client.clone();
        let settings = draft();
        saving.set(true);
        spawn(async move {
            match save_settings(cms, &client, &settings).await {
                Ok(()) => toasts.success("CMS settings saved successfully!"),
                Err(e) => {
                    tracing::error!("saving CMS settings failed: {e}");
                    toasts.error("Failed to save CMS settings");
                }
            }
            draft.set(cms.peek().data.clone());
            saving.set(false);
        });
    };

    rsx! {
        PageHeader {
            title: "CMS Settings",
            subtitle: "Control the visibility of different sections on the website",
        }

        div {
            class: "panel",
            ul {
                class: "toggle-list",
                for section in Section::ALL {
                    li {
                        key: "{section.key()}",
                        class: "toggle-row",
                        div {
                            h3 { "{section.label()}" }
                            p { class: "muted", "{section.description()}" }
                        }
                        button {
                            class: if draft.read().get(section) { "switch on" } else { "switch" },
                            role: "switch",
                            "aria-checked": "{draft.read().get(section)}",
                            title: "{section.label()}",
                            onclick: move |_| {
                                let visible = draft.read().get(section);
                                draft.write().set(section, !visible);
                            },
                            span { class: "switch-knob" }
                        }
                    }
                }
            }

            div {
                class: "panel-actions",
                button {
                    class: "btn btn-outline",
                    disabled: saving() || !dirty,
                    onclick: move |_| draft.set(cms.peek().data.clone()),
                    "Reset"
                }
                button {
                    class: "btn btn-primary",
                    disabled: saving(),
                    onclick: save,
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            }
        }

        div {
            class: "callout callout-info",
            h4 { "Note" }
            p {
                "These settings control which sections are visible on the public website. "
                "Changes take effect immediately after saving."
            }
        }
    }
}
