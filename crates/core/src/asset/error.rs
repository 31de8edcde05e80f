//! Asset upload error types.

use thiserror::Error;

use super::types::AssetRole;
use crate::storage::{StorageError, StorageStage};

/// Why a single asset upload failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadCause {
    /// Payload or content type absent.
    #[error("missing {field}")]
    MissingField {
        /// Field name.
        field: &'static str,
    },

    /// Payload is not valid base64.
    #[error("payload is not valid base64: {message}")]
    MalformedPayload {
        /// Decoder message.
        message: String,
    },

    /// Content type outside the accepted image formats.
    #[error("unsupported media type {}", .content_type.as_deref().unwrap_or("<none>"))]
    UnsupportedMediaType {
        /// Declared content type, if any.
        content_type: Option<String>,
    },

    /// Decoded payload refused by storage before writing: empty or larger
    /// than the configured maximum.
    #[error("payload rejected: {message}")]
    RejectedPayload {
        /// Storage error message.
        message: String,
    },

    /// Blob storage failed to write or publish the object.
    #[error("storage {stage} failed: {message}")]
    StorageWriteFailed {
        /// Failing stage.
        stage: StorageStage,
        /// Storage error message.
        message: String,
    },
}

impl UploadCause {
    /// Stable machine-readable name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::MalformedPayload { .. } => "malformed_payload",
            Self::UnsupportedMediaType { .. } => "unsupported_media_type",
            Self::RejectedPayload { .. } => "rejected_payload",
            Self::StorageWriteFailed { .. } => "storage_write_failed",
        }
    }
}

/// A failed upload, tagged with the role it was for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{role} upload failed: {cause}")]
pub struct AssetUploadFailed {
    /// Slot the upload targeted.
    pub role: AssetRole,
    /// Underlying failure.
    #[source]
    pub cause: UploadCause,
}

impl AssetUploadFailed {
    /// Create a missing field failure.
    #[must_use]
    pub fn missing_field(role: AssetRole, field: &'static str) -> Self {
        Self {
            role,
            cause: UploadCause::MissingField { field },
        }
    }

    /// Create a malformed payload failure.
    #[must_use]
    pub fn malformed_payload(role: AssetRole, message: impl Into<String>) -> Self {
        Self {
            role,
            cause: UploadCause::MalformedPayload {
                message: message.into(),
            },
        }
    }

    /// Create an unsupported media type failure.
    #[must_use]
    pub fn unsupported_media_type(role: AssetRole, content_type: Option<&str>) -> Self {
        Self {
            role,
            cause: UploadCause::UnsupportedMediaType {
                content_type: content_type.map(String::from),
            },
        }
    }

    /// Wrap a storage error. Empty and oversized payloads become
    /// `RejectedPayload`.
    #[must_use]
    pub fn storage(role: AssetRole, err: &StorageError) -> Self {
        let cause = match err {
            StorageError::EmptyPayload { .. } | StorageError::FileTooLarge { .. } => {
                UploadCause::RejectedPayload {
                    message: err.to_string(),
                }
            }
            _ => UploadCause::StorageWriteFailed {
                stage: err.stage(),
                message: err.to_string(),
            },
        };
        Self { role, cause }
    }
}
