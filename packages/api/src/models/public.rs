//! Records shown on the public website.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Active hero banner from `/public/hero/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSlide {
    #[serde(deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    /// `image` or `video`.
    #[serde(rename = "type")]
    pub kind: String,
    pub heading: String,
    pub subheading: Option<String>,
    pub media_url: Option<String>,
    pub video: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
}

impl HeroSlide {
    pub fn is_video(&self) -> bool {
        self.kind == "video" && self.video.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Call to action, only when both text and link are set.
    pub fn cta(&self) -> Option<(&str, &str)> {
        match (self.cta_text.as_deref(), self.cta_link.as_deref()) {
            (Some(text), Some(link)) if !text.is_empty() && !link.is_empty() => Some((text, link)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentCard {
    #[serde(deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

impl AgentCard {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        let name = format!("{first} {last}").trim().to_string();
        if name.is_empty() {
            self.username.clone()
        } else {
            name
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyCard {
    #[serde(deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    pub title: String,
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_url: Option<String>,
}

impl PropertyCard {
    pub fn image_src(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .or(self.image.as_deref())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_cta_requires_both_parts() {
        let hero: HeroSlide = serde_json::from_str(
            r#"{"id":1,"type":"video","heading":"Live here","video":"https://v/x.mp4","cta_text":"Book"}"#,
        )
        .unwrap();
        assert!(hero.is_video());
        assert_eq!(hero.cta(), None);
        assert_eq!(hero.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_agent_full_name_falls_back_to_username() {
        let agent = AgentCard {
            username: "sara".into(),
            ..Default::default()
        };
        assert_eq!(agent.full_name(), "sara");
    }

    #[test]
    fn test_property_price_from_decimal_string() {
        let p: PropertyCard =
            serde_json::from_str(r#"{"title":"Loft","price":"1250000.00"}"#).unwrap();
        assert_eq!(p.price, Some(1_250_000.0));
    }
}
