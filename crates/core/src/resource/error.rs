//! Resource error types.

use std::fmt::Display;

use landmark_shared::ResourceId;
use thiserror::Error;

use crate::asset::{AssetUploadFailed, MissingField};

/// Record store failures.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// No record under this ID.
    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    /// Backend failure.
    #[error("record store error: {0}")]
    Backend(String),
}

impl RecordStoreError {
    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Errors from registering and reading resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Resource not found.
    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    /// Record store failed.
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}

/// Errors from attaching assets to a resource.
///
/// Only `RecordUpdateFailed` can happen after objects were written *and* the
/// record was due to change; every other variant leaves the record untouched.
#[derive(Debug, Error)]
pub enum AttachError {
    /// Required inputs absent. Nothing was uploaded.
    #[error("missing input: {}", join(.missing))]
    MissingInput {
        /// Every absent field.
        missing: Vec<MissingField>,
    },

    /// Resource not found. Nothing was uploaded.
    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    /// One or both uploads failed. The record was not modified.
    #[error("attachment failed: {}", join(.failures))]
    AttachmentFailed {
        /// One entry per failed role.
        failures: Vec<AssetUploadFailed>,
    },

    /// Both uploads succeeded but the record write failed.
    #[error("record update failed: {0}")]
    RecordUpdateFailed(#[source] RecordStoreError),

    /// Reading the record before uploading failed.
    #[error(transparent)]
    Store(RecordStoreError),
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
