use dioxus::prelude::*;
use store::UserProfile;

use crate::auth::{AuthState, LogoutButton};
use crate::icons::*;
use crate::Icon;

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Users,
    Agents,
    Building,
    Handshake,
    Images,
    Star,
    Card,
    Globe,
    Leads,
    Chart,
    Settings,
    Calendar,
    Documents,
    Revenue,
    Profile,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: NavIcon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavGroup {
    pub title: &'static str,
    pub items: Vec<NavItem>,
}

const fn item(label: &'static str, path: &'static str, icon: NavIcon) -> NavItem {
    NavItem { label, path, icon }
}

fn admin_nav() -> Vec<NavGroup> {
    vec![
        NavGroup {
            title: "Overview",
            items: vec![
                item("Dashboard", "/dashboard", NavIcon::Dashboard),
                item("Analytics", "/analytics", NavIcon::Chart),
            ],
        },
        NavGroup {
            title: "Sales",
            items: vec![
                item("Leads", "/leads", NavIcon::Leads),
                item("Users", "/users", NavIcon::Users),
                item("Agents", "/agents", NavIcon::Agents),
            ],
        },
        NavGroup {
            title: "Content",
            items: vec![
                item("Properties", "/properties", NavIcon::Building),
                item("Collaborations", "/collaborations", NavIcon::Handshake),
                item("Hero", "/hero", NavIcon::Images),
                item("Slides", "/slides", NavIcon::Images),
                item("YourPerfect", "/yourperfect", NavIcon::Star),
                item("Sidebar Cards", "/sidebarcard", NavIcon::Card),
                item("DAMAC", "/damac", NavIcon::Building),
                item("Empowering Communities", "/empoweringcommunities", NavIcon::Globe),
                item("CMS Settings", "/cms-settings", NavIcon::Settings),
            ],
        },
    ]
}

fn agent_nav() -> Vec<NavGroup> {
    vec![
        NavGroup {
            title: "Workspace",
            items: vec![
                item("Dashboard", "/agent/dashboard", NavIcon::Dashboard),
                item("My Leads", "/agent/leads", NavIcon::Leads),
                item("Revenue", "/agent/revenue", NavIcon::Revenue),
                item("Reports", "/agent/reports", NavIcon::Chart),
            ],
        },
        NavGroup {
            title: "Records",
            items: vec![
                item("Properties", "/agent/properties", NavIcon::Building),
                item("Appointments", "/agent/appointments", NavIcon::Calendar),
                item("Documents", "/agent/documents", NavIcon::Documents),
            ],
        },
    ]
}

/// Menu for the signed-in role. Admins who are also agents see both.
pub fn nav_for(auth: &AuthState) -> Vec<NavGroup> {
    let mut groups = Vec::new();
    if auth.is_admin() {
        groups.extend(admin_nav());
    }
    if auth.is_agent() {
        groups.extend(agent_nav());
    }
    groups.push(NavGroup {
        title: "Account",
        items: vec![item("Profile", "/profile", NavIcon::Profile)],
    });
    groups
}

#[component]
fn NavGlyph(icon: NavIcon) -> Element {
    let (w, h) = (16, 16);
    match icon {
        NavIcon::Dashboard => rsx! { Icon { icon: FaHouse, width: w, height: h } },
        NavIcon::Users => rsx! { Icon { icon: FaUsers, width: w, height: h } },
        NavIcon::Agents => rsx! { Icon { icon: FaUserTie, width: w, height: h } },
        NavIcon::Building => rsx! { Icon { icon: FaBuilding, width: w, height: h } },
        NavIcon::Handshake => rsx! { Icon { icon: FaHandshake, width: w, height: h } },
        NavIcon::Images => rsx! { Icon { icon: FaImages, width: w, height: h } },
        NavIcon::Star => rsx! { Icon { icon: FaStar, width: w, height: h } },
        NavIcon::Card => rsx! { Icon { icon: FaCreditCard, width: w, height: h } },
        NavIcon::Globe => rsx! { Icon { icon: FaGlobe, width: w, height: h } },
        NavIcon::Leads => rsx! { Icon { icon: FaAddressBook, width: w, height: h } },
        NavIcon::Chart => rsx! { Icon { icon: FaChartLine, width: w, height: h } },
        NavIcon::Settings => rsx! { Icon { icon: FaGear, width: w, height: h } },
        NavIcon::Calendar => rsx! { Icon { icon: FaCalendarDays, width: w, height: h } },
        NavIcon::Documents => rsx! { Icon { icon: FaFileLines, width: w, height: h } },
        NavIcon::Revenue => rsx! { Icon { icon: FaSackDollar, width: w, height: h } },
        NavIcon::Profile => rsx! { Icon { icon: FaCircleUser, width: w, height: h } },
    }
}

#[component]
pub fn AppSidebar(
    groups: Vec<NavGroup>,
    active_path: String,
    user: Option<UserProfile>,
    on_navigate: EventHandler<&'static str>,
) -> Element {
    let mut expanded = use_signal(|| false);

    let role_label = match &user {
        Some(u) if u.is_admin() => "Admin Panel",
        Some(u) if u.is_agent() => "Agent Workspace",
        _ => "Dashboard",
    };

    rsx! {
        document::Stylesheet { href: SIDEBAR_CSS }

        button {
            class: "sidebar-toggle",
            title: "Menu",
            onclick: move |_| expanded.set(!expanded()),
            Icon { icon: FaBars, width: 18, height: 18 }
        }
        if expanded() {
            div {
                class: "sidebar-scrim",
                onclick: move |_| expanded.set(false),
            }
        }

        nav {
            class: if expanded() { "sidebar expanded" } else { "sidebar" },

            div {
                class: "sidebar-brand",
                h1 { "DAMAC" }
                p { "{role_label}" }
            }

            div {
                class: "sidebar-groups",
                for group in groups {
                    div {
                        key: "{group.title}",
                        class: "sidebar-group",
                        p { class: "sidebar-group-title", "{group.title}" }
                        for entry in group.items {
                            button {
                                key: "{entry.path}",
                                class: if active_path == entry.path { "sidebar-item active" } else { "sidebar-item" },
                                title: "{entry.label}",
                                onclick: move |_| {
                                    expanded.set(false);
                                    on_navigate.call(entry.path);
                                },
                                NavGlyph { icon: entry.icon }
                                span { "{entry.label}" }
                            }
                        }
                    }
                }
            }

            div {
                class: "sidebar-bottom",
                if let Some(u) = user {
                    div {
                        class: "sidebar-user",
                        span { class: "sidebar-user-name", "{u.display_name()}" }
                        span { class: "sidebar-user-email", "{u.email}" }
                    }
                }
                LogoutButton { class: "sidebar-bottom-item", label: "Log out" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use store::{AuthSnapshot, Role};

    use super::*;

    fn auth(role: Role) -> AuthState {
        AuthState {
            snapshot: AuthSnapshot {
                user: Some(UserProfile {
                    role,
                    ..Default::default()
                }),
                is_authenticated: true,
                ..Default::default()
            },
            loading: false,
        }
    }

    fn paths(groups: &[NavGroup]) -> Vec<&'static str> {
        groups.iter().flat_map(|g| g.items.iter().map(|i| i.path)).collect()
    }

    #[test]
    fn test_menus_follow_role() {
        let admin = paths(&nav_for(&auth(Role::Admin)));
        assert!(admin.contains(&"/cms-settings"));
        assert!(!admin.contains(&"/agent/leads"));

        let agent = paths(&nav_for(&auth(Role::Agent)));
        assert!(agent.contains(&"/agent/leads"));
        assert!(!agent.contains(&"/users"));

        assert_eq!(paths(&nav_for(&auth(Role::User))), vec!["/profile"]);
    }
}
