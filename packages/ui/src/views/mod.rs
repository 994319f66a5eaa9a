//! Pages of the dashboard and the public website.

mod agent_dashboard;
mod agent_leads;
mod analytics;
mod cms_settings;
mod common;
mod dashboard;
mod leads;
mod profile;
mod public;
mod reports;
mod resources;
mod revenue;

pub use agent_dashboard::AgentDashboardPage;
pub use agent_leads::AgentLeadsPage;
pub use analytics::AnalyticsPage;
pub use cms_settings::CmsSettingsPage;
pub use common::{ErrorState, LoadingState, PageHeader, StatCard};
pub use dashboard::DashboardPage;
pub use leads::LeadsPage;
pub use profile::ProfilePage;
pub use public::PublicSite;
pub use reports::AgentReportsPage;
pub use resources::{
    AgentAppointmentsPage, AgentDocumentsPage, AgentPropertiesPage, AgentsPage,
    CollaborationsPage, DamacPage, EmpoweringCommunitiesPage, HeroPage, PropertiesPage,
    SidebarCardsPage, SlidesPage, UsersPage, YourPerfectPage,
};
pub use revenue::AgentRevenuePage;
