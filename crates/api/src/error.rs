//! API error responses.
//!
//! Domain errors are folded into [`AppError`], which decides both the HTTP
//! status and the numeric `errorCode`. Attachment failures additionally list
//! every failed role so a caller sees all of them at once.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use landmark_core::asset::{AssetUploadFailed, MissingField, UploadCause};
use landmark_core::resource::{AttachError, ResourceError};
use landmark_core::storage::StorageStage;
use landmark_shared::{AppError, ErrorCode};
use serde::Serialize;
use tracing::{error, warn};

use crate::response::Envelope;

/// One failed input or upload, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetail {
    /// `thumbnail` or `marker`.
    pub role: &'static str,
    /// Machine-readable cause.
    pub cause: &'static str,
    /// Code this failure alone would have produced.
    pub error_code: ErrorCode,
    /// Human-readable description.
    pub message: String,
}

impl FailureDetail {
    fn missing(field: &MissingField) -> Self {
        Self {
            role: field.role.as_str(),
            cause: "missing_field",
            error_code: ErrorCode::MissingInput,
            message: format!("{field} is required"),
        }
    }

    fn upload(failure: &AssetUploadFailed) -> Self {
        Self {
            role: failure.role.as_str(),
            cause: failure.cause.kind(),
            error_code: cause_code(&failure.cause),
            message: failure.cause.to_string(),
        }
    }
}

/// Failure body.
#[derive(Serialize)]
struct FailureBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<FailureDetail>,
}

/// Error returned from handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: AppError,
    failures: Vec<FailureDetail>,
}

impl ApiError {
    fn new(error: AppError, failures: Vec<FailureDetail>) -> Self {
        let status = StatusCode::from_u16(error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            error,
            failures,
        }
    }

    /// Map a failed registration.
    #[must_use]
    pub fn create(err: &ResourceError) -> Self {
        Self::new(AppError::CreateFailed(err.to_string()), Vec::new())
    }

    /// Map a failed lookup.
    #[must_use]
    pub fn read(err: &ResourceError) -> Self {
        let error = match err {
            ResourceError::NotFound(id) => AppError::NotFound(format!("resource {id}")),
            ResourceError::Store(e) => AppError::ReadFailed(e.to_string()),
        };
        Self::new(error, Vec::new())
    }

    /// A path id that cannot name any resource.
    #[must_use]
    pub fn unknown_id(raw: &str) -> Self {
        Self::new(AppError::NotFound(format!("resource {raw}")), Vec::new())
    }

    /// A request body that could not be parsed. Oversized bodies answer
    /// `413`; every other rejection, a missing content type included, is a
    /// `400` so that `415` keeps meaning an unsupported image type.
    #[must_use]
    pub fn rejected(rejection: &JsonRejection) -> Self {
        let mut err = Self::new(AppError::MalformedPayload(rejection.body_text()), Vec::new());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            err.status = StatusCode::PAYLOAD_TOO_LARGE;
        }
        err
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Wire error code of the response.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        self.error.error_code()
    }

    /// Per-role failure details.
    #[must_use]
    pub fn failures(&self) -> &[FailureDetail] {
        &self.failures
    }
}

impl From<AttachError> for ApiError {
    fn from(err: AttachError) -> Self {
        let message = err.to_string();
        match err {
            AttachError::MissingInput { missing } => Self::new(
                AppError::MissingInput(message),
                missing.iter().map(FailureDetail::missing).collect(),
            ),
            AttachError::NotFound(_) => Self::new(AppError::NotFound(message), Vec::new()),
            AttachError::AttachmentFailed { failures } => {
                let details: Vec<_> = failures.iter().map(FailureDetail::upload).collect();
                Self::new(aggregate_error(&details, message), details)
            }
            AttachError::RecordUpdateFailed(_) => {
                Self::new(AppError::RecordUpdateFailed(message), Vec::new())
            }
            AttachError::Store(_) => Self::new(AppError::ReadFailed(message), Vec::new()),
        }
    }
}

/// Code a single upload cause maps to.
fn cause_code(cause: &UploadCause) -> ErrorCode {
    match cause {
        UploadCause::MissingField { .. } => ErrorCode::MissingInput,
        UploadCause::MalformedPayload { .. } | UploadCause::RejectedPayload { .. } => {
            ErrorCode::MalformedPayload
        }
        UploadCause::UnsupportedMediaType { .. } => ErrorCode::UnsupportedMediaType,
        UploadCause::StorageWriteFailed {
            stage: StorageStage::Write,
            ..
        } => ErrorCode::UploadFailed,
        UploadCause::StorageWriteFailed {
            stage: StorageStage::Publish,
            ..
        } => ErrorCode::PublishFailed,
    }
}

/// The request-level error: the shared code when every failure agrees,
/// otherwise a generic upload failure.
fn aggregate_error(details: &[FailureDetail], message: String) -> AppError {
    let mut codes = details.iter().map(|d| d.error_code);
    let first = codes.next();
    let shared = first.filter(|code| codes.all(|c| c == *code));

    match shared {
        Some(ErrorCode::MissingInput) => AppError::MissingInput(message),
        Some(ErrorCode::MalformedPayload) => AppError::MalformedPayload(message),
        Some(ErrorCode::UnsupportedMediaType) => AppError::UnsupportedMediaType(message),
        Some(ErrorCode::PublishFailed) => AppError::PublishFailed(message),
        _ => AppError::UploadFailed(message),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error.error_code().as_u16();
        let message = self.error.to_string();
        if self.status.is_server_error() {
            error!(error_code = code, error = %message, "Request failed");
        } else {
            warn!(error_code = code, error = %message, "Request rejected");
        }

        let body = FailureBody {
            message,
            failures: self.failures,
        };
        (
            self.status,
            Json(Envelope::failure(self.error.error_code(), body)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landmark_core::asset::AssetRole;
    use landmark_core::resource::RecordStoreError;
    use landmark_core::storage::StorageError;
    use landmark_shared::ResourceId;
    use rstest::rstest;

    fn write_failure(role: AssetRole) -> AssetUploadFailed {
        AssetUploadFailed::storage(role, &StorageError::write_failed("k", "reset"))
    }

    fn publish_failure(role: AssetRole) -> AssetUploadFailed {
        AssetUploadFailed::storage(role, &StorageError::publish_failed("k", "denied"))
    }

    #[rstest]
    #[case(
        vec![AssetUploadFailed::unsupported_media_type(AssetRole::Marker, Some("image/bmp"))],
        ErrorCode::UnsupportedMediaType,
        415
    )]
    #[case(
        vec![AssetUploadFailed::malformed_payload(AssetRole::Thumbnail, "bad byte")],
        ErrorCode::MalformedPayload,
        400
    )]
    #[case(
        vec![AssetUploadFailed::storage(AssetRole::Marker, &StorageError::file_too_large(11, 10))],
        ErrorCode::MalformedPayload,
        400
    )]
    #[case(vec![write_failure(AssetRole::Thumbnail)], ErrorCode::UploadFailed, 502)]
    #[case(vec![publish_failure(AssetRole::Marker)], ErrorCode::PublishFailed, 502)]
    #[case(
        vec![publish_failure(AssetRole::Thumbnail), publish_failure(AssetRole::Marker)],
        ErrorCode::PublishFailed,
        502
    )]
    #[case(
        vec![
            AssetUploadFailed::unsupported_media_type(AssetRole::Thumbnail, None),
            write_failure(AssetRole::Marker),
        ],
        ErrorCode::UploadFailed,
        502
    )]
    fn test_attachment_failure_codes(
        #[case] failures: Vec<AssetUploadFailed>,
        #[case] code: ErrorCode,
        #[case] status: u16,
    ) {
        let count = failures.len();
        let err = ApiError::from(AttachError::AttachmentFailed { failures });

        assert_eq!(err.error_code(), code);
        assert_eq!(err.status().as_u16(), status);
        assert_eq!(err.failures().len(), count);
    }

    #[test]
    fn test_failure_details_keep_per_role_codes() {
        let err = ApiError::from(AttachError::AttachmentFailed {
            failures: vec![
                AssetUploadFailed::unsupported_media_type(AssetRole::Thumbnail, Some("text/plain")),
                publish_failure(AssetRole::Marker),
            ],
        });

        let details = err.failures();
        assert_eq!(details[0].role, "thumbnail");
        assert_eq!(details[0].cause, "unsupported_media_type");
        assert_eq!(details[0].error_code, ErrorCode::UnsupportedMediaType);
        assert_eq!(details[1].role, "marker");
        assert_eq!(details[1].cause, "storage_write_failed");
        assert_eq!(details[1].error_code, ErrorCode::PublishFailed);
    }

    #[test]
    fn test_missing_input_lists_each_field() {
        let err = ApiError::from(AttachError::MissingInput {
            missing: vec![
                MissingField {
                    role: AssetRole::Thumbnail,
                    field: MissingField::PAYLOAD,
                },
                MissingField {
                    role: AssetRole::Marker,
                    field: MissingField::CONTENT_TYPE,
                },
            ],
        });

        assert_eq!(err.error_code(), ErrorCode::MissingInput);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.failures().len(), 2);
        assert_eq!(err.failures()[1].message, "marker.contentType is required");
    }

    #[rstest]
    #[case(AttachError::NotFound(ResourceId::new()), ErrorCode::NotFound, 404)]
    #[case(
        AttachError::RecordUpdateFailed(RecordStoreError::backend("conflict")),
        ErrorCode::RecordUpdateFailed,
        500
    )]
    #[case(
        AttachError::Store(RecordStoreError::backend("timeout")),
        ErrorCode::ReadFailed,
        500
    )]
    fn test_attach_error_mapping(
        #[case] err: AttachError,
        #[case] code: ErrorCode,
        #[case] status: u16,
    ) {
        let err = ApiError::from(err);
        assert_eq!(err.error_code(), code);
        assert_eq!(err.status().as_u16(), status);
        assert!(err.failures().is_empty());
    }

    #[test]
    fn test_read_and_create_mapping() {
        let id = ResourceId::new();
        assert_eq!(
            ApiError::read(&ResourceError::NotFound(id)).error_code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            ApiError::read(&ResourceError::Store(RecordStoreError::backend("down"))).error_code(),
            ErrorCode::ReadFailed
        );
        assert_eq!(
            ApiError::create(&ResourceError::Store(RecordStoreError::backend("down"))).error_code(),
            ErrorCode::CreateFailed
        );
    }
}
