//! CMS section flags in context, and the wrapper that hides public sections.

use api::{ApiClient, ApiError};
use dioxus::prelude::*;
use store::{CmsSettings, CmsState, Section};

use crate::context::use_api;

pub fn use_cms() -> Signal<CmsState> {
    use_context::<Signal<CmsState>>()
}

/// Provides the CMS flags and fetches them once per page load.
#[component]
pub fn CmsProvider(children: Element) -> Element {
    let client = use_api();
    let mut cms = use_signal(|| CmsState::load(store::platform_storage().as_ref()));

    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            if !cms.write().begin_fetch() {
                return;
            }
            let result = api::cms::get(&client).await.map_err(|e| e.to_string());
            let mut state = cms.write();
            state.finish_fetch(result);
            state.persist(store::platform_storage().as_ref());
        }
    });

    use_context_provider(|| cms);

    rsx! {
        {children}
    }
}

/// Save the full flag set; the response replaces the local flags.
pub async fn save_settings(
    mut cms: Signal<CmsState>,
    client: &ApiClient,
    settings: &CmsSettings,
) -> Result<(), ApiError> {
    cms.write().begin_update();
    let result = api::cms::update(client, settings).await;
    let mut state = cms.write();
    state.finish_update(result.clone().map_err(|e| e.to_string()));
    state.persist(store::platform_storage().as_ref());
    result.map(|_| ())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionRender {
    Hidden,
    Placeholder,
    Visible,
}

pub fn section_render(state: &CmsState, section: Section) -> SectionRender {
    if !state.is_visible(section) {
        SectionRender::Hidden
    } else if state.loading && !state.loaded {
        SectionRender::Placeholder
    } else {
        SectionRender::Visible
    }
}

/// Renders `children` only while `section` is switched on.
#[component]
pub fn SectionGated(section: Section, children: Element) -> Element {
    let cms = use_cms();

    let render = section_render(&cms.read(), section);
    match render {
        SectionRender::Hidden => rsx! {},
        SectionRender::Placeholder => rsx! {
            div { class: "section-placeholder", "Loading..." }
        },
        SectionRender::Visible => rsx! {
            {children}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_section_renders_nothing() {
        let mut state = CmsState::default();
        state.data.set(Section::Marketing, false);
        state.loaded = true;

        assert_eq!(section_render(&state, Section::Marketing), SectionRender::Hidden);
        assert_eq!(section_render(&state, Section::Hero), SectionRender::Visible);
    }

    #[test]
    fn test_placeholder_during_first_fetch() {
        let mut state = CmsState::default();
        assert!(state.begin_fetch());
        assert_eq!(section_render(&state, Section::Agents), SectionRender::Placeholder);

        state.finish_fetch(Err("offline".to_string()));
        assert_eq!(section_render(&state, Section::Agents), SectionRender::Visible);
        assert!(!state.begin_fetch());
    }
}
