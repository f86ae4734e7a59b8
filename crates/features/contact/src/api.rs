//! HTTP endpoint of the contact slice.

use crate::{Contact, ContactError, ContactMessage};
use axum::Json;
use axum::extract::State;
use evreg_derive::{api_handler, api_model};
use evreg_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[api_model(deny_unknown_fields = false)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::MissingField { .. } => Self::bad_request(err.client_message()),
            _ => Self::internal(err.client_message()),
        }
    }
}

#[api_handler(
    post,
    path = "/contact-admin",
    request_body = ContactRequest,
    responses(
        (status = OK, description = "Message forwarded", body = StatusResponse),
        (status = BAD_REQUEST, description = "A field is empty", body = FailureResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Mail delivery failed", body = FailureResponse),
    ),
    tag = CONTACT_TAG,
)]
pub async fn contact_admin(
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let contact = state.try_get_slice::<Contact>()?;
    let message = ContactMessage::new(&request.name, &request.email, &request.message)?;
    contact.send(&message).await?;
    Ok(Json(StatusResponse::success()))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(contact_admin))
}
