//! # CMS section flags
//!
//! The public website has five sections that an admin can switch on and off.
//! [`CmsSettings`] holds the flags as the backend sends them (camelCase keys
//! on the wire) and [`CmsState`] wraps them with the fetch/update lifecycle.
//!
//! Two defaults are deliberately different:
//!
//! - before any fetch every section is visible ([`CmsSettings::default`]);
//! - a fetched payload that omits a key hides that section (field-level
//!   `#[serde(default)]` on `bool` yields `false`).
//!
//! Settings are fetched at most once per page load. A failed fetch still marks
//! the state as loaded so the site renders with the defaults instead of
//! retrying on every render. Only [`CmsState::data`] is persisted.

use serde::{Deserialize, Serialize};

use crate::persist::{self, CMS_KEY};
use crate::storage::KeyValueStore;

/// Visibility flags for the public website sections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsSettings {
    #[serde(default)]
    pub hero_section: bool,
    #[serde(default)]
    pub agents_section: bool,
    #[serde(default)]
    pub properties_section: bool,
    #[serde(default)]
    pub lead_form_section: bool,
    #[serde(default)]
    pub marketing_section: bool,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            hero_section: true,
            agents_section: true,
            properties_section: true,
            lead_form_section: true,
            marketing_section: true,
        }
    }
}

impl CmsSettings {
    pub fn get(&self, section: Section) -> bool {
        match section {
            Section::Hero => self.hero_section,
            Section::Agents => self.agents_section,
            Section::Properties => self.properties_section,
            Section::LeadForm => self.lead_form_section,
            Section::Marketing => self.marketing_section,
        }
    }

    pub fn set(&mut self, section: Section, visible: bool) {
        let flag = match section {
            Section::Hero => &mut self.hero_section,
            Section::Agents => &mut self.agents_section,
            Section::Properties => &mut self.properties_section,
            Section::LeadForm => &mut self.lead_form_section,
            Section::Marketing => &mut self.marketing_section,
        };
        *flag = visible;
    }
}

/// A toggleable section of the public website.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Agents,
    Properties,
    LeadForm,
    Marketing,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Agents,
        Section::Properties,
        Section::LeadForm,
        Section::Marketing,
    ];

    /// Wire key of the flag.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Hero => "heroSection",
            Section::Agents => "agentsSection",
            Section::Properties => "propertiesSection",
            Section::LeadForm => "leadFormSection",
            Section::Marketing => "marketingSection",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Hero => "Hero Section",
            Section::Agents => "Agents Section",
            Section::Properties => "Properties Section",
            Section::LeadForm => "Lead Form Section",
            Section::Marketing => "Marketing Section",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Section::Hero => "Main banner slider at the top of the website",
            Section::Agents => "Team of agents shown to visitors",
            Section::Properties => "Featured property listings",
            Section::LeadForm => "Contact form that creates new leads",
            Section::Marketing => "Marketing banners and promotional blocks",
        }
    }
}

/// CMS flags plus request lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CmsState {
    pub data: CmsSettings,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

impl CmsState {
    /// Restore persisted flags. The loaded marker is not persisted, so the
    /// first visit of a page load still refreshes from the backend.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        Self {
            data: persist::load(storage, CMS_KEY).unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn persist(&self, storage: &dyn KeyValueStore) {
        persist::save(storage, CMS_KEY, &self.data);
    }

    /// Start a fetch. Returns `false` when the settings were already loaded
    /// or a request is in flight, in which case the caller must not fetch.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loaded || self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    pub fn finish_fetch(&mut self, result: Result<CmsSettings, String>) {
        self.loading = false;
        self.loaded = true;
        match result {
            Ok(settings) => self.data = settings,
            Err(e) => {
                tracing::warn!("cms settings fetch failed, using defaults: {e}");
                self.error = Some(e);
            }
        }
    }

    pub fn begin_update(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_update(&mut self, result: Result<CmsSettings, String>) {
        self.loading = false;
        match result {
            Ok(settings) => {
                self.data = settings;
                self.loaded = true;
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Forget the loaded marker so the next visit fetches again.
    pub fn reset(&mut self) {
        *self = Self {
            data: self.data.clone(),
            ..Default::default()
        };
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.data.get(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_defaults_show_everything() {
        let state = CmsState::default();
        for section in Section::ALL {
            assert!(state.is_visible(section));
        }
    }

    #[test]
    fn test_missing_key_hides_section() {
        let settings: CmsSettings = serde_json::from_str(
            r#"{"heroSection":true,"agentsSection":false,"propertiesSection":true,"marketingSection":true}"#,
        )
        .unwrap();
        assert!(settings.hero_section);
        assert!(!settings.agents_section);
        assert!(!settings.lead_form_section);
    }

    #[test]
    fn test_fetch_happens_once() {
        let mut state = CmsState::default();
        assert!(state.begin_fetch());
        assert!(!state.begin_fetch());

        state.finish_fetch(Ok(CmsSettings {
            marketing_section: false,
            ..Default::default()
        }));
        assert!(state.loaded);
        assert!(!state.is_visible(Section::Marketing));
        assert!(!state.begin_fetch());
    }

    #[test]
    fn test_failed_fetch_keeps_defaults_and_marks_loaded() {
        let mut state = CmsState::default();
        state.begin_fetch();
        state.finish_fetch(Err("Network Error".to_string()));

        assert!(state.loaded);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network Error"));
        assert_eq!(state.data, CmsSettings::default());
    }

    #[test]
    fn test_only_data_is_persisted() {
        let storage = MemoryStorage::new();
        let mut state = CmsState::default();
        state.begin_fetch();
        state.finish_fetch(Ok(CmsSettings {
            hero_section: false,
            ..Default::default()
        }));
        state.persist(&storage);

        let restored = CmsState::load(&storage);
        assert!(!restored.loaded);
        assert!(!restored.is_visible(Section::Hero));
        assert!(restored.is_visible(Section::Agents));
    }

    #[test]
    fn test_section_keys() {
        assert_eq!(Section::from_key("leadFormSection"), Some(Section::LeadForm));
        assert_eq!(Section::from_key("footer"), None);

        let mut settings = CmsSettings::default();
        settings.set(Section::Properties, false);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["propertiesSection"], false);
    }
}
