use dioxus::prelude::*;

use api::ApiClient;
use store::{DashboardConfig, Session, TrafficTracker};
use ui::views::{
    AgentAppointmentsPage, AgentDashboardPage, AgentDocumentsPage, AgentLeadsPage, AgentPropertiesPage,
    AgentReportsPage, AgentRevenuePage, AgentsPage, AnalyticsPage, CmsSettingsPage,
    CollaborationsPage, DamacPage, EmpoweringCommunitiesPage, HeroPage, LeadsPage,
    ProfilePage, PropertiesPage, SidebarCardsPage, SlidesPage, UsersPage, YourPerfectPage,
};
use ui::{AuthProvider, CmsProvider, ToastProvider};
use views::{AdminArea, AgentArea, Dashboard, Login, NotFound, Register, Shell, Site};

mod landing;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/site")]
    Site {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},

    #[layout(Shell)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/profile")]
        ProfilePage {},

        #[layout(AdminArea)]
            #[route("/analytics")]
            AnalyticsPage {},
            #[route("/leads")]
            LeadsPage {},
            #[route("/users")]
            UsersPage {},
            #[route("/agents")]
            AgentsPage {},
            #[route("/properties")]
            PropertiesPage {},
            #[route("/collaborations")]
            CollaborationsPage {},
            #[route("/hero")]
            HeroPage {},
            #[route("/slides")]
            SlidesPage {},
            #[route("/yourperfect")]
            YourPerfectPage {},
            #[route("/sidebarcard")]
            SidebarCardsPage {},
            #[route("/damac")]
            DamacPage {},
            #[route("/empoweringcommunities")]
            EmpoweringCommunitiesPage {},
            #[route("/cms-settings")]
            CmsSettingsPage {},
        #[end_layout]

        #[layout(AgentArea)]
        #[nest("/agent")]
            #[route("/dashboard")]
            AgentDashboardPage {},
            #[route("/leads")]
            AgentLeadsPage {},
            #[route("/revenue")]
            AgentRevenuePage {},
            #[route("/reports")]
            AgentReportsPage {},
            #[route("/properties")]
            AgentPropertiesPage {},
            #[route("/appointments")]
            AgentAppointmentsPage {},
            #[route("/documents")]
            AgentDocumentsPage {},
        #[end_nest]
        #[end_layout]
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

/// Shared handles built once per page load.
#[derive(Clone)]
struct Services {
    config: DashboardConfig,
    client: ApiClient,
    traffic: TrafficTracker,
}

fn build_services() -> Result<Services, api::ApiError> {
    let config = api::config::load(DashboardConfig::default());
    let storage = store::platform_storage();
    let session = Session::rehydrate(storage.clone());
    let client = ApiClient::new(&config.api, session)?;

    let traffic = TrafficTracker::new(storage);
    if let Some(ctx) = landing::current() {
        traffic.initialize(&ctx);
    }

    tracing::info!(base_url = %config.api.base_url, "dashboard starting");
    Ok(Services {
        config,
        client,
        traffic,
    })
}

#[component]
fn App() -> Element {
    let services = use_hook(|| build_services().map_err(|e| e.to_string()));
    // Built once, so the early return keeps the same hook order on every render.
    let services = match services {
        Ok(services) => services,
        Err(message) => {
            tracing::error!("cannot start dashboard: {message}");
            return rsx! {
                document::Stylesheet { href: ui::THEME_CSS }
                div {
                    class: "access-denied",
                    h2 { "Something went wrong" }
                    p { class: "muted", "{message}" }
                }
            };
        }
    };

    let auto_close_ms = services.config.notifications.auto_close_ms;
    use_context_provider(|| services.config.clone());
    use_context_provider(|| services.client.clone());
    use_context_provider(|| services.traffic.clone());

    rsx! {
        // Global app resources
        document::Stylesheet { href: ui::THEME_CSS }
        document::Stylesheet { href: ui::VIEWS_CSS }
        document::Stylesheet { href: MAIN_CSS }

        ToastProvider {
            auto_close_ms,
            AuthProvider {
                CmsProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Redirect `/` to the dashboard.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}
