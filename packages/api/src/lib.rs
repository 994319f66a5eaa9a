//! # API crate: REST client for the lead-management backend
//!
//! Everything the dashboard sends over the network goes through
//! [`ApiClient`], which attaches the bearer token, debounces identical GETs and
//! turns a 401 into a session reset plus a broadcast [`Unauthorized`] signal.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `ApiClient`: request/response interceptors and the GET debounce |
//! | [`transport`] | `Transport` trait and the reqwest implementation |
//! | [`request`] | Transport-neutral request, body and response values |
//! | [`resource`] | Generic REST collections (`CrudApi`, `ResourceApi`) and list normalization |
//! | [`endpoints`] | Endpoint paths |
//! | [`auth`], [`cms`], [`leads`], [`deals`], [`analytics`], [`public`], [`agent`] | Endpoints with bespoke payloads |
//! | [`models`] | Typed leads, deals and public-site records |
//! | [`config`] | `API_BASE_URL` overlay and media origin |
//!
//! The `testing` feature exposes [`mock::MockTransport`] to downstream crates.

pub mod agent;
pub mod analytics;
pub mod auth;
pub mod client;
pub mod cms;
pub mod config;
pub mod deals;
pub mod endpoints;
pub mod error;
pub mod leads;
pub mod models;
pub mod public;
pub mod request;
pub mod resource;
pub mod transport;

mod time;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use client::{ApiClient, Unauthorized, UnauthorizedEvents};
pub use error::ApiError;
pub use request::{ApiRequest, ApiResponse, FormPart, Method, PartValue, RequestBody};
pub use resource::{normalize_list, record_id, CrudApi, Page, Resource, ResourceApi};
pub use transport::{ReqwestTransport, Transport};
