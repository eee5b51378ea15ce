//! Handlers for records and listing text that come from outside the scrapers.

use autoscan_core::{Filter, VehicleRecord};
use autoscan_pipeline::SearchOutcome;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_pipeline_error, parse_body, ApiError, ApiResponse, AppState, FilterRequest};

#[derive(Debug, Deserialize)]
pub(super) struct ImportRequest {
    pub vehicles: Vec<VehicleRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    pub content: String,
    #[serde(rename = "searchParams", default)]
    pub filter: Filter,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeResponse {
    pub vehicles: Vec<VehicleRecord>,
}

#[derive(Debug, Serialize)]
pub(super) struct PromptResponse {
    pub prompt: String,
}

/// POST /api/import: reconcile externally produced records.
pub(super) async fn import(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SearchOutcome>>, ApiError> {
    let body = parse_body(&req_id.0, body)?;
    let outcome = state.pipeline.import_records(body.vehicles).await;
    Ok(ApiResponse::respond(outcome, req_id))
}

/// POST /api/analyze: extract records from pasted listing text.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let body = parse_body(&req_id.0, body)?;

    let vehicles = state
        .pipeline
        .analyze_manual_content(&body.content, &body.filter)
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, &e))?;

    Ok(ApiResponse::respond(AnalyzeResponse { vehicles }, req_id))
}

/// POST /api/prompt: the extraction prompt for use with an external assistant.
pub(super) async fn prompt(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PromptResponse>>, ApiError> {
    let body = parse_body(&req_id.0, body)?;
    let prompt = state.pipeline.manual_prompt(&body.filter);
    Ok(ApiResponse::respond(PromptResponse { prompt }, req_id))
}
