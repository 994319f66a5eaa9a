//! # Generic CRUD manager
//!
//! One component renders list, search, create/edit form and delete
//! confirmation for any REST collection. Pages describe the collection with
//! [`Column`] and [`FormField`] descriptors and pass a [`CrudHandle`].
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`descriptor`] | Column and form-field descriptors |
//! | [`form`] | Form values, validation and request payloads |
//! | [`list`] | Display values, search and cell rendering |
//! | [`actions`] | Load / save / delete round trips with a single refetch |
//! | [`component`] | The `CrudManager` component |

pub mod actions;
pub mod component;
pub mod descriptor;
pub mod form;
pub mod list;

pub use actions::{Saved, SubmitError};
pub use component::{CrudHandle, CrudManager, FieldInput};
pub use descriptor::{CellKind, Column, FieldKind, FormField, SelectOption};
pub use form::{FieldErrors, FieldValue, FileUpload, FormData};
