//! Response envelope.
//!
//! Every JSON response, success or failure, is wrapped as
//! `{"header": {"status": ..., "errorCode": ...}, "body": ...}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use landmark_shared::ErrorCode;
use serde::Serialize;

/// Outcome recorded in the envelope header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Request completed.
    Success,
    /// Request failed; see `errorCode`.
    Failure,
}

/// Envelope header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Outcome.
    pub status: Status,
    /// Numeric error code, `0` on success.
    pub error_code: ErrorCode,
}

/// Response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    /// Outcome header.
    pub header: Header,
    /// Payload.
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a successful payload.
    pub fn success(body: T) -> Self {
        Self {
            header: Header {
                status: Status::Success,
                error_code: ErrorCode::Ok,
            },
            body,
        }
    }

    /// Wrap a failure payload.
    pub fn failure(error_code: ErrorCode, body: T) -> Self {
        Self {
            header: Header {
                status: Status::Failure,
                error_code,
            },
            body,
        }
    }
}

/// Successful JSON reply with an explicit status code.
pub struct ApiResponse<T> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK`.
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope::success(body),
        }
    }

    /// `201 Created`.
    pub fn created(body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            envelope: Envelope::success(body),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success(json!({"id": "abc"}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "header": {"status": "success", "errorCode": 0},
                "body": {"id": "abc"}
            })
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = Envelope::failure(ErrorCode::MissingInput, json!({}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "header": {"status": "failure", "errorCode": 105},
                "body": {}
            })
        );
    }
}
