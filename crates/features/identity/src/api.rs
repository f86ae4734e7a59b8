//! HTTP endpoint of the identity slice.

use crate::{Identity, IdentityError};
use axum::Json;
use axum::extract::State;
use evreg_derive::{api_handler, api_model};
use evreg_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Missing fields count as empty strings and simply fail the check.
#[api_model(deny_unknown_fields = false)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[api_model]
pub struct LoginResponse {
    pub status: &'static str,
    pub admin: String,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub profile: PrincipalProfile,
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        Self::unauthorized(err.client_message())
    }
}

#[api_handler(
    post,
    path = "/admin-login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Credentials accepted", body = LoginResponse),
        (status = UNAUTHORIZED, description = "Invalid credentials", body = FailureResponse),
    ),
    tag = IDENTITY_TAG,
)]
pub async fn admin_login(
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let identity = state.try_get_slice::<Identity>()?;
    let (admin, profile) = identity.login(&request.username, &request.password)?;
    Ok(Json(LoginResponse { status: STATUS_SUCCESS, admin, profile }))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(admin_login))
}
