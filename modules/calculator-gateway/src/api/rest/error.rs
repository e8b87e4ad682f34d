//! Error mapping from gateway failures to HTTP responses.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use super::dto::ErrorBody;

/// Failures surfaced to HTTP clients. Each variant carries the detail string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Missing or non-integer operands; the backend is never called.
    #[error("Both a and b must be valid numbers")]
    Validation(String),

    /// The liveness probe failed.
    #[error("calculator backend is not available")]
    BackendUnavailable(String),

    /// The `Add` call failed after the probe passed.
    #[error("Failed to perform addition")]
    BackendCallFailed(String),
}

impl GatewayError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BackendCallFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn details(&self) -> &str {
        match self {
            Self::Validation(d) | Self::BackendUnavailable(d) | Self::BackendCallFailed(d) => d,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details().to_owned(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            GatewayError::Validation(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::BackendUnavailable(String::new()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::BackendCallFailed(String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn response_body_has_error_and_details() {
        let resp = GatewayError::BackendCallFailed("deadline exceeded: Add".to_owned()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Failed to perform addition");
        assert_eq!(body.details, "deadline exceeded: Add");
    }
}
