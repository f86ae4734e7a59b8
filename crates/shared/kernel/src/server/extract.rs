use crate::server::error::ApiError;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

/// `axum::Json` whose rejection is reported in the failure envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}
