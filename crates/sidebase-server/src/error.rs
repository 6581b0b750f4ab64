//! HTTP mapping for service errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use sidebase_protocols::error::ServiceError;

/// HTTP status for a service error.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error body, `{"error": "<message>"}`.
pub fn error_body(err: &ServiceError) -> serde_json::Value {
    serde_json::json!({ "error": err.to_string() })
}

/// Wrapper so handlers can `?`-propagate service errors into responses.
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (status_for(&self.0), Json(error_body(&self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_is_400() {
        let err = ServiceError::InvalidRequest("Text content is required.".to_string());
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_quota_is_429() {
        let err = ServiceError::QuotaExceeded("quota".to_string());
        assert_eq!(status_for(&err), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_parse_and_generation_are_500() {
        assert_eq!(
            status_for(&ServiceError::ParseError("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&ServiceError::GenerationFailed("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let err = ServiceError::InvalidRequest("missing".to_string());
        let body = error_body(&err);
        assert_eq!(body["error"], "missing");
    }
}
