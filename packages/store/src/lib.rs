//! Client-side state for the dashboard: persisted session, CMS section flags,
//! traffic tracking and the `dashboard.toml` configuration.
//!
//! Everything here is plain Rust with no UI dependency so it can be unit
//! tested natively. The `ui` crate mirrors these values into Dioxus signals.

pub mod cms;
pub mod config;
pub mod models;
pub mod persist;
pub mod session;
pub mod storage;
pub mod traffic;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use cms::{CmsSettings, CmsState, Section};
pub use config::DashboardConfig;
pub use models::{Role, UserProfile};
pub use session::{AuthSnapshot, Session};
pub use storage::KeyValueStore;
pub use traffic::{LandingContext, TrafficSource, TrackingData, TrafficTracker};

/// Storage backend appropriate for the current platform.
///
/// Browser builds with the `web` feature use `window.localStorage`; every other
/// target keeps values in memory for the lifetime of the process.
pub fn platform_storage() -> std::sync::Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        std::sync::Arc::new(LocalStorage::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        std::sync::Arc::new(MemoryStorage::new())
    }
}
