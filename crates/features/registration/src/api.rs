//! HTTP endpoints of the registration slice.

use crate::{Registrar, RegistrationError};
use axum::Json;
use axum::extract::State;
use evreg_derive::{api_handler, api_model};
use evreg_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `{"status": "success", "registration": {...}}`
#[api_model]
pub struct RegisterResponse {
    pub status: &'static str,
    /// The stored record, including fields the server does not interpret
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub registration: Registration,
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Storage { .. } => Self::internal(err.client_message()),
            _ => Self::bad_request(err.client_message()),
        }
    }
}

#[api_handler(
    post,
    path = "/register",
    responses(
        (status = OK, description = "Registration stored", body = RegisterResponse),
        (status = BAD_REQUEST, description = "Malformed or duplicate student id", body = FailureResponse),
    ),
    tag = REGISTRATION_TAG,
)]
pub async fn register(
    State(state): State<ApiState>,
    ApiJson(registration): ApiJson<Registration>,
) -> ApiResult<Json<RegisterResponse>> {
    let registrar = state.try_get_slice::<Registrar>()?;
    let registration = registrar.submit(registration).await?;
    Ok(Json(RegisterResponse { status: STATUS_SUCCESS, registration }))
}

#[api_handler(
    get,
    path = "/registrations",
    responses((status = OK, description = "All registrations in stored order")),
    tag = REGISTRATION_TAG,
)]
pub async fn list_registrations(State(state): State<ApiState>) -> ApiResult<Json<Vec<Registration>>> {
    let registrar = state.try_get_slice::<Registrar>()?;
    Ok(Json(registrar.list().await?))
}

#[api_handler(
    delete,
    path = "/registrations",
    request_body = IndexRequest,
    responses(
        (status = OK, description = "Registration removed", body = StatusResponse),
        (status = BAD_REQUEST, description = "Invalid index", body = FailureResponse),
    ),
    tag = REGISTRATION_TAG,
)]
pub async fn delete_registration(
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<IndexRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let registrar = state.try_get_slice::<Registrar>()?;
    registrar.delete(request.position()).await?;
    Ok(Json(StatusResponse::success()))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(list_registrations, delete_registration))
}
