//! Typed access to the hotel REST backend.
//!
//! [`ApiClient`] owns the HTTP transport; [`ResourceService`] gives every
//! resource the same list/get/create/update/patch/delete/activate/deactivate
//! surface, keyed by the resource's path.

mod client;
mod pagination;
mod resource;
mod services;

pub use client::{ApiClient, MERGE_PATCH_CONTENT_TYPE, TOTAL_COUNT_HEADER};
pub use pagination::{Page, PageRequest, SortDirection, SortOrder};
pub use resource::{Resource, ResourceService};
