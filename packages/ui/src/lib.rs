//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const THEME_CSS: Asset = asset!("/assets/styling/theme.css");
pub const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

pub mod context;
pub use context::{use_api, use_config, use_media_origin, use_traffic};

pub mod toast;
pub use toast::{use_toasts, ToastProvider, Toasts};

pub mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

pub mod cms;
pub use cms::{use_cms, CmsProvider, SectionGated};

pub mod guard;
pub use guard::{AccessDenied, Gate, GateDecision, GateLoading};

mod modal;
pub use modal::{ConfirmDialog, ModalOverlay};

mod sidebar;
pub use sidebar::{nav_for, AppSidebar, NavGroup, NavItem};

pub mod crud;

pub mod views;
