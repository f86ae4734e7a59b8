//! HTTP endpoint of the reports slice.

use crate::{ReportError, Reports, XLSX_MIME};
use axum::extract::{Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use evreg_derive::{api_handler, api_model};
use evreg_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `?event=Chess`; blank means every registration
#[api_model(deny_unknown_fields = false)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ExportQuery {
    /// Event to filter by, matched case-insensitively
    #[serde(default)]
    pub event: Option<String>,
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self::internal(err.to_string())
    }
}

#[api_handler(
    get,
    path = "/export-excel",
    params(ExportQuery),
    responses(
        (status = OK, description = "Spreadsheet download", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = INTERNAL_SERVER_ERROR, description = "Export failed", body = FailureResponse),
    ),
    tag = REPORTS_TAG,
)]
pub async fn export_excel(
    State(state): State<ApiState>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let reports = state.try_get_slice::<Reports>()?;
    let export = reports.export(query.event.as_deref()).await?;

    let disposition = HeaderValue::from_bytes(
        format!("attachment; filename=\"{}\"", export.filename).as_bytes(),
    )
    .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"registrations.xlsx\""));

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME)), (header::CONTENT_DISPOSITION, disposition)],
        export.bytes,
    )
        .into_response())
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(export_excel))
}
