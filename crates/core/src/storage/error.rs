//! Storage error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which half of a blob write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStage {
    /// Persisting the bytes.
    Write,
    /// Making the persisted object publicly observable.
    Publish,
}

impl StorageStage {
    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for StorageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing to write.
    #[error("refusing to store empty payload at {key}")]
    EmptyPayload {
        /// Target storage key.
        key: String,
    },

    /// File size exceeds maximum allowed.
    #[error("file size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Backend rejected or failed the write.
    #[error("write to {key} failed: {message}")]
    WriteFailed {
        /// Target storage key.
        key: String,
        /// Backend error message.
        message: String,
    },

    /// Object was written but could not be confirmed visible.
    #[error("publish of {key} failed: {message}")]
    PublishFailed {
        /// Target storage key.
        key: String,
        /// Backend error message.
        message: String,
    },

    /// File not found in storage.
    #[error("file not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create a write failure.
    #[must_use]
    pub fn write_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a publish failure.
    #[must_use]
    pub fn publish_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PublishFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// The stage of a blob write this error belongs to.
    ///
    /// Everything that happens before the object exists is a write failure.
    #[must_use]
    pub const fn stage(&self) -> StorageStage {
        match self {
            Self::PublishFailed { .. } => StorageStage::Publish,
            _ => StorageStage::Write,
        }
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}
