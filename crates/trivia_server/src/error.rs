//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"success": false, "error": <message>}`
//! with the status matching its kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde::Serialize;
use trivia_core::{ErrorKind, ServiceError};

pub const MISSING_PARAMETER: &str = "Missing parameter.";
pub const NOT_FOUND: &str = "Not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Boundary error returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Internal,
}

impl ApiError {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::BadRequest => MISSING_PARAMETER,
            Self::NotFound => NOT_FOUND,
            Self::Internal => INTERNAL_ERROR,
        }
    }

    /// Classifies a service failure and logs it under `op`.
    pub fn from_service(op: &str, err: ServiceError) -> Self {
        match err.kind() {
            ErrorKind::Validation => {
                warn!("event=http_request op={op} status=rejected error_code=validation error={err}");
                Self::BadRequest
            }
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::Internal => {
                error!("event=http_request op={op} status=error error_code=internal error={err}");
                Self::Internal
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::RepoError;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            ApiError::from_service("test", ServiceError::EmptySearchTerm).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from_service("test", ServiceError::QuestionNotFound(3)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from_service(
                "test",
                ServiceError::Repo(RepoError::InvalidData("boom".to_string()))
            ),
            ApiError::Internal
        );
    }

    #[test]
    fn error_body_uses_single_error_key() {
        let body = serde_json::to_value(ErrorBody {
            success: false,
            error: ApiError::NotFound.message(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "error": "Not found"}));
    }
}
