//! HTTP endpoints of the catalog slice.

use crate::{Catalog, CatalogError};
use axum::Json;
use axum::extract::State;
use evreg_derive::{api_handler, api_model};
use evreg_kernel::prelude::*;
use std::collections::HashMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `{"status": "success", "event": {...}}`
#[api_model]
pub struct AddEventResponse {
    pub status: &'static str,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub event: Event,
}

/// `{"enabled_map": {"Chess": false, "Art": true}}`
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
pub struct EnabledMapRequest {
    /// Event name to its new availability; unknown names are ignored
    #[serde(default)]
    pub enabled_map: HashMap<String, bool>,
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Storage { .. } => Self::internal(err.client_message()),
            _ => Self::bad_request(err.client_message()),
        }
    }
}

#[api_handler(
    get,
    path = "/events",
    responses((status = OK, description = "Event catalog in stored order")),
    tag = CATALOG_TAG,
)]
pub async fn list_events(State(state): State<ApiState>) -> ApiResult<Json<Vec<Event>>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    Ok(Json(catalog.list().await?))
}

#[api_handler(
    post,
    path = "/add_event",
    responses(
        (status = OK, description = "Event appended", body = AddEventResponse),
        (status = BAD_REQUEST, description = "Blank or duplicate name", body = FailureResponse),
    ),
    tag = CATALOG_TAG,
)]
pub async fn add_event(
    State(state): State<ApiState>,
    ApiJson(event): ApiJson<Event>,
) -> ApiResult<Json<AddEventResponse>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let event = catalog.add(event).await?;
    Ok(Json(AddEventResponse { status: STATUS_SUCCESS, event }))
}

#[api_handler(
    delete,
    path = "/events",
    request_body = IndexRequest,
    responses(
        (status = OK, description = "Event and its registrations removed", body = StatusResponse),
        (status = BAD_REQUEST, description = "Invalid index", body = FailureResponse),
    ),
    tag = CATALOG_TAG,
)]
pub async fn delete_event(
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<IndexRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    catalog.delete(request.position()).await?;
    Ok(Json(StatusResponse::success()))
}

#[api_handler(
    post,
    path = "/events/enabled",
    request_body = EnabledMapRequest,
    responses((status = OK, description = "Availability updated", body = StatusResponse)),
    tag = CATALOG_TAG,
)]
pub async fn set_events_enabled(
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<EnabledMapRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    catalog.set_enabled(&request.enabled_map).await?;
    Ok(Json(StatusResponse::success()))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_events, delete_event))
        .routes(routes!(add_event))
        .routes(routes!(set_events_enabled))
}
