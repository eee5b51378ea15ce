//! Handlers that acquire from marketplaces, plus locator preview and reset.

use std::collections::BTreeMap;

use autoscan_core::{Filter, Locator};
use autoscan_pipeline::{ScrapeOutcome, SearchOutcome};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_pipeline_error, parse_body, ApiError, ApiResponse, AppState, FilterRequest};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    #[serde(rename = "searchParams", default)]
    pub filter: Filter,
    /// Platform ids to acquire from; empty means all.
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct UrlsResponse {
    pub urls: BTreeMap<String, Locator>,
}

#[derive(Debug, Serialize)]
pub(super) struct ResetResponse {
    pub cleared: usize,
    pub message: &'static str,
}

/// POST /api/search: full search run over the selected platforms.
pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SearchOutcome>>, ApiError> {
    let body = parse_body(&req_id.0, body)?;

    let outcome = state
        .pipeline
        .run_search(&body.filter, &body.platforms)
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, &e))?;

    Ok(ApiResponse::respond(outcome, req_id))
}

/// POST /api/scrape/{platform}: acquire and extract one platform, without
/// reconciliation.
pub(super) async fn scrape_platform(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(platform): Path<String>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ScrapeOutcome>>, ApiError> {
    let body = parse_body(&req_id.0, body)?;

    let outcome = state
        .pipeline
        .run_single_scrape(&platform, &body.filter)
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, &e))?;

    Ok(ApiResponse::respond(outcome, req_id))
}

/// POST /api/urls: the search locator per platform, without fetching.
pub(super) async fn search_urls(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UrlsResponse>>, ApiError> {
    let body = parse_body(&req_id.0, body)?;

    let urls = state
        .pipeline
        .build_locators(&body.filter)
        .map_err(|e| map_pipeline_error(&req_id.0, &e))?;

    Ok(ApiResponse::respond(UrlsResponse { urls }, req_id))
}

/// POST /api/reset: forget every seen listing.
pub(super) async fn reset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ResetResponse>> {
    let cleared = state.pipeline.reset_store();
    ApiResponse::respond(
        ResetResponse {
            cleared,
            message: "Fahrzeug-Cache geleert",
        },
        req_id,
    )
}
