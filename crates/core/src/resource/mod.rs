//! Resource records and the asset attachment orchestrator.
//!
//! A resource is registered with its social-profile identifiers and later
//! receives a thumbnail and a marker image in a single `attach` call. Both
//! uploads run concurrently; the record is written once, and only when both
//! succeed.
//!
//! Callers must not run two `attach` calls for the same resource at the same
//! time. The record update is a plain last-write-wins field merge.

mod error;
mod service;
mod types;

pub use error::{AttachError, RecordStoreError, ResourceError};
pub use service::{ResourceRepository, ResourceService};
pub use types::{AssetLocations, AttachInput, AttachReceipt, NewResource, Resource};
