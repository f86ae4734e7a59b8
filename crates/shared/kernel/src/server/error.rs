//! The failure envelope every handler answers with.

use crate::domain::constants::{STATUS_FAIL, STATUS_SUCCESS};
use crate::server::state::ApiStateError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use evreg_derive::api_model;
use std::borrow::Cow;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// `{"status": "fail", "error": "..."}`
#[api_model]
pub struct FailureResponse {
    /// Always `fail`
    pub status: &'static str,
    /// Human readable reason
    pub error: String,
}

/// `{"status": "success"}`
#[api_model]
pub struct StatusResponse {
    /// Always `success`
    pub status: &'static str,
}

impl StatusResponse {
    #[must_use]
    pub const fn success() -> Self {
        Self { status: STATUS_SUCCESS }
    }
}

/// An HTTP error: status code plus the message shown to the client.
///
/// Feature crates convert their own error enums into this with `From`, choosing
/// the status per variant.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self { status, message: message.into() }
    }

    /// Local validation failure (400).
    #[must_use]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Storage, export or transport failure (500).
    #[must_use]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "Request failed");
        }
        let body = FailureResponse { status: STATUS_FAIL, error: self.message.into_owned() };
        (self.status, Json(body)).into_response()
    }
}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn failure_envelope_shape() {
        let response = ApiError::bad_request("Student ID already registered.").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "status": "fail", "error": "Student ID already registered." })
        );
    }
}
