//! Application-wide error types.

use serde::Serialize;
use thiserror::Error;

/// Numeric error codes carried in every response header.
///
/// Clients predate the HTTP status mapping and branch on these values, so the
/// numbers are part of the wire contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// Request completed.
    Ok = 0,
    /// Registering a resource failed.
    CreateFailed = 101,
    /// Reading a resource failed.
    ReadFailed = 102,
    /// Uploading assets failed.
    UploadFailed = 103,
    /// Content type is not a supported image format.
    UnsupportedMediaType = 104,
    /// A required input was absent.
    MissingInput = 105,
    /// Resource does not exist.
    NotFound = 106,
    /// Writing asset locations to the record failed.
    RecordUpdateFailed = 107,
    /// Payload could not be decoded, or is empty or over the size limit.
    MalformedPayload = 108,
    /// Stored object could not be made visible.
    PublishFailed = 109,
}

impl ErrorCode {
    /// Returns the numeric wire value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Required input missing.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Content type outside the supported set.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Payload could not be decoded.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Registering a resource failed.
    #[error("Create failed: {0}")]
    CreateFailed(String),

    /// Reading a resource failed.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Object storage write failed.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Object storage publish step failed.
    #[error("Publish failed: {0}")]
    PublishFailed(String),

    /// Record update after successful uploads failed.
    #[error("Record update failed: {0}")]
    RecordUpdateFailed(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::MissingInput(_) | Self::MalformedPayload(_) => 400,
            Self::UnsupportedMediaType(_) => 415,
            Self::UploadFailed(_) | Self::PublishFailed(_) => 502,
            Self::CreateFailed(_) | Self::ReadFailed(_) | Self::RecordUpdateFailed(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::MissingInput(_) => ErrorCode::MissingInput,
            Self::UnsupportedMediaType(_) => ErrorCode::UnsupportedMediaType,
            Self::MalformedPayload(_) => ErrorCode::MalformedPayload,
            Self::CreateFailed(_) => ErrorCode::CreateFailed,
            Self::ReadFailed(_) => ErrorCode::ReadFailed,
            Self::UploadFailed(_) => ErrorCode::UploadFailed,
            Self::PublishFailed(_) => ErrorCode::PublishFailed,
            Self::RecordUpdateFailed(_) => ErrorCode::RecordUpdateFailed,
        }
    }
}
