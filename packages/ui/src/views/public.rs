//! The public website. Every section sits behind its CMS flag.

use api::leads::PublicLead;
use api::models::{AgentCard, HeroSlide, PropertyCard};
use dioxus::prelude::*;
use store::Section;

use super::common::format_amount;
use crate::cms::SectionGated;
use crate::context::{use_api, use_media_origin, use_traffic};
use crate::crud::list::{media_url, truncate};
use crate::icons::*;
use crate::toast::use_toasts;
use crate::Icon;

const MARKETING: [(&str, &str); 3] = [
    ("Award Winning", "Recognized excellence in real estate development"),
    ("Global Presence", "Properties in prime locations worldwide"),
    ("Luxury Living", "Premium amenities and exceptional quality"),
];

/// Toast text for a failed public submission. 403 means the form is
/// switched off server side.
fn submit_failure(status: Option<u16>) -> &'static str {
    match status {
        Some(403) => "Lead form is currently disabled. Please try again later.",
        _ => "Failed to submit lead. Please try again.",
    }
}

/// Pairs each row with its id, or its position when the id is missing.
fn keyed<T>(rows: Vec<T>, id: impl Fn(&T) -> Option<String>) -> Vec<(String, T)> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| (id(&row).unwrap_or_else(|| i.to_string()), row))
        .collect()
}

#[component]
pub fn PublicSite(#[props(default = "/".to_string())] page: String) -> Element {
    rsx! {
        div {
            class: "public-site",
            SectionGated { section: Section::Hero, PublicHero {} }
            SectionGated { section: Section::Properties, PublicProperties {} }
            SectionGated { section: Section::Agents, PublicAgents {} }
            SectionGated { section: Section::LeadForm, PublicLeadForm { page } }
            SectionGated { section: Section::Marketing, Marketing {} }
            footer {
                class: "public-footer",
                p { "© DAMAC Properties. All rights reserved." }
            }
        }
    }
}

#[component]
fn PublicHero() -> Element {
    let client = use_api();
    let media_origin = use_media_origin();

    let hero = use_resource(move || {
        let client = client.clone();
        async move {
            api::public::hero(&client).await.unwrap_or_else(|e| {
                tracing::warn!("loading hero failed: {e}");
                None
            })
        }
    });

    let Some(loaded) = hero.read().clone() else {
        return rsx! {
            section { class: "public-hero placeholder", "Loading hero..." }
        };
    };
    // No active hero: nothing to show.
    let Some(slide) = loaded else {
        return rsx! {};
    };

    rsx! { HeroBanner { slide, media_origin } }
}

#[component]
fn HeroBanner(slide: HeroSlide, media_origin: String) -> Element {
    let cta = slide
        .cta()
        .map(|(text, link)| (text.to_string(), link.to_string()));
    let image = slide
        .media_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(|u| media_url(&media_origin, u));
    let video = slide
        .is_video()
        .then(|| slide.video.clone())
        .flatten();

    rsx! {
        section {
            class: "public-hero",
            if let Some(src) = video {
                video { class: "hero-media", src: "{src}", autoplay: true, muted: true, r#loop: true, playsinline: true }
            } else if let Some(src) = image {
                img { class: "hero-media", src: "{src}", alt: "{slide.heading}" }
            }
            div {
                class: "hero-overlay",
                h1 { "{slide.heading}" }
                if let Some(sub) = slide.subheading.as_deref().filter(|s| !s.is_empty()) {
                    p { class: "hero-sub", "{sub}" }
                }
                if let Some((text, link)) = cta {
                    a { class: "btn btn-primary btn-lg", href: "{link}", "{text}" }
                }
            }
        }
    }
}

#[component]
fn PublicProperties() -> Element {
    let client = use_api();
    let media_origin = use_media_origin();

    let properties = use_resource(move || {
        let client = client.clone();
        async move {
            api::public::properties(&client).await.unwrap_or_else(|e| {
                tracing::warn!("loading public properties failed: {e}");
                Vec::new()
            })
        }
    });

    let rows = properties.read().clone();

    rsx! {
        section {
            class: "public-section",
            h2 { class: "public-title", "Featured Properties" }
            {match rows {
                None => rsx! { p { class: "muted center", "Loading properties..." } },
                Some(rows) if rows.is_empty() => rsx! {
                    p { class: "muted center", "No properties listed at the moment." }
                },
                Some(rows) => rsx! {
                    div {
                        class: "card-grid",
                        for (key, property) in keyed(rows, |p| p.id.clone()) {
                            PropertyTile {
                                key: "{key}",
                                property,
                                media_origin: media_origin.clone(),
                            }
                        }
                    }
                },
            }}
        }
    }
}

#[component]
fn PropertyTile(property: PropertyCard, media_origin: String) -> Element {
    let image = property.image_src().map(|src| media_url(&media_origin, src));
    let price = property.price.map(|p| format_amount(p, "AED"));
    let description = property
        .description
        .as_deref()
        .map(|d| truncate(d, 120))
        .unwrap_or_default();

    rsx! {
        article {
            class: "public-card",
            if let Some(src) = image {
                img { class: "card-media", src: "{src}", alt: "{property.title}" }
            } else {
                div { class: "card-media empty" }
            }
            div {
                class: "card-body",
                h3 { "{property.title}" }
                if let Some(location) = property.location.as_deref() {
                    p {
                        class: "muted",
                        Icon { icon: FaLocationDot, width: 12, height: 12 }
                        " {location}"
                    }
                }
                p { "{description}" }
                if let Some(price) = price {
                    span { class: "card-price", "{price}" }
                }
            }
        }
    }
}

#[component]
fn PublicAgents() -> Element {
    let client = use_api();
    let media_origin = use_media_origin();
    let mut reload = use_signal(|| 0u32);

    let agents = use_resource(move || {
        let client = client.clone();
        let _ = reload();
        async move {
            api::public::agents(&client).await.map_err(|e| {
                tracing::warn!("loading public agents failed: {e}");
                "Failed to load agents".to_string()
            })
        }
    });

    let rows = agents.read().clone();

    rsx! {
        section {
            class: "public-section alt",
            h2 { class: "public-title", "Meet Our Agents" }
            {match rows {
                None => rsx! { p { class: "muted center", "Loading agents..." } },
                Some(Err(message)) => rsx! {
                    div {
                        class: "center",
                        p { class: "error-text", "{message}" }
                        button { class: "btn btn-primary", onclick: move |_| reload += 1, "Try Again" }
                    }
                },
                Some(Ok(rows)) if rows.is_empty() => rsx! {
                    div {
                        class: "center muted",
                        p { "No agents available at the moment." }
                        p { "Please check back later or contact us directly." }
                    }
                },
                Some(Ok(rows)) => rsx! {
                    div {
                        class: "card-grid",
                        for (key, agent) in keyed(rows, |a| a.id.clone()) {
                            AgentTile {
                                key: "{key}",
                                agent,
                                media_origin: media_origin.clone(),
                            }
                        }
                    }
                },
            }}
        }
    }
}

#[component]
fn AgentTile(agent: AgentCard, media_origin: String) -> Element {
    let photo = agent
        .photo_url
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|src| media_url(&media_origin, src));
    let name = agent.full_name();

    rsx! {
        article {
            class: "public-card agent-card",
            if let Some(src) = photo {
                img { class: "card-media portrait", src: "{src}", alt: "{name}" }
            } else {
                div {
                    class: "card-media portrait empty",
                    Icon { icon: FaUser, width: 40, height: 40 }
                    p { "No Photo" }
                }
            }
            div {
                class: "card-body",
                h3 { "{name}" }
                if let Some(title) = agent.title.as_deref().filter(|s| !s.is_empty()) {
                    p { class: "agent-title", "{title}" }
                }
                if let Some(bio) = agent.bio.as_deref().filter(|s| !s.is_empty()) {
                    p { class: "muted clamp", "{bio}" }
                }
                if !agent.email.is_empty() {
                    a {
                        class: "contact-line",
                        href: "mailto:{agent.email}",
                        Icon { icon: FaEnvelope, width: 12, height: 12 }
                        " {agent.email}"
                    }
                }
                if let Some(phone) = agent.phone.as_deref().filter(|s| !s.is_empty()) {
                    a {
                        class: "contact-line",
                        href: "tel:{phone}",
                        Icon { icon: FaPhone, width: 12, height: 12 }
                        " {phone}"
                    }
                }
            }
        }
    }
}

#[component]
fn PublicLeadForm(page: String) -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let traffic = use_traffic();
    let mut lead = use_signal(PublicLead::default);
    let mut sending = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if !lead.read().is_submittable() {
            toasts.error("Please fill in all required fields");
            return;
        }
        let tracking = traffic.data(&page);
        let payload = lead.read().clone().with_tracking(&tracking, &page);
        let client = client.clone();
        sending.set(true);
        spawn(async move {
            match api::leads::submit_public(&client, &payload).await {
                Ok(_) => {
                    tracing::info!(source = %payload.traffic_source, "public lead submitted");
                    toasts.success("Lead submitted successfully! We will contact you soon.");
                    lead.set(PublicLead::default());
                }
                Err(e) => {
                    tracing::error!("submitting lead failed: {e}");
                    toasts.error(submit_failure(e.status()));
                }
            }
            sending.set(false);
        });
    };

    rsx! {
        section {
            class: "public-section muted-bg",
            div {
                class: "lead-form-wrap",
                h2 { class: "public-title", "Get In Touch" }
                p { class: "muted center", "Leave your details and one of our agents will contact you." }
                form {
                    class: "panel lead-form",
                    onsubmit: submit,
                    label {
                        class: "form-field",
                        span { class: "form-label", "Full Name *" }
                        input {
                            value: "{lead.read().name}",
                            oninput: move |evt| lead.write().name = evt.value(),
                        }
                    }
                    label {
                        class: "form-field",
                        span { class: "form-label", "Email Address *" }
                        input {
                            r#type: "email",
                            value: "{lead.read().email}",
                            oninput: move |evt| lead.write().email = evt.value(),
                        }
                    }
                    label {
                        class: "form-field",
                        span { class: "form-label", "Phone Number" }
                        input {
                            r#type: "tel",
                            value: "{lead.read().phone}",
                            oninput: move |evt| lead.write().phone = evt.value(),
                        }
                    }
                    label {
                        class: "form-field",
                        span { class: "form-label", "Message" }
                        textarea {
                            rows: "4",
                            value: "{lead.read().message}",
                            oninput: move |evt| lead.write().message = evt.value(),
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary btn-block",
                        disabled: sending(),
                        if sending() { "Submitting..." } else { "Submit" }
                    }
                }
            }
        }
    }
}

#[component]
fn Marketing() -> Element {
    rsx! {
        section {
            class: "public-section marketing",
            h2 { class: "public-title", "Why Choose DAMAC Properties?" }
            div {
                class: "marketing-grid",
                for (title, text) in MARKETING {
                    div {
                        key: "{title}",
                        class: "marketing-item",
                        Icon { icon: FaStar, width: 28, height: 28 }
                        h3 { "{title}" }
                        p { "{text}" }
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
    fn test_submit_failure_messages() {
        assert_eq!(
            submit_failure(Some(403)),
            "Lead form is currently disabled. Please try again later."
        );
        assert_eq!(submit_failure(Some(500)), "Failed to submit lead. Please try again.");
        assert_eq!(submit_failure(None), "Failed to submit lead. Please try again.");
    }

    #[test]
    fn test_keyed_falls_back_to_position() {
        let rows = keyed(vec![Some("7"), None], |r| r.map(str::to_string));
        assert_eq!(rows[0].0, "7");
        assert_eq!(rows[1].0, "1");
    }
}
