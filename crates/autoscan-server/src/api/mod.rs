mod manual;
mod search;
mod telegram;

use std::sync::Arc;

use autoscan_core::Filter;
use autoscan_notify::NotifyError;
use autoscan_pipeline::{Pipeline, PipelineError};
use autoscan_scraper::ScraperError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Body shared by endpoints that only take a filter.
#[derive(Debug, Default, Deserialize)]
pub(super) struct FilterRequest {
    #[serde(rename = "searchParams", default)]
    pub filter: Filter,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    extraction: &'static str,
    notifications: &'static str,
    known_vehicles: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn respond(data: T, req_id: RequestId) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(req_id.0),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Unwraps a JSON body, answering malformed input with the error envelope
/// instead of axum's plain-text rejection.
pub(super) fn parse_body<T>(
    request_id: &str,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(request_id, "bad_request", rejection.body_text()))
}

pub(super) fn map_pipeline_error(request_id: &str, error: &PipelineError) -> ApiError {
    let code = match error {
        PipelineError::InvalidFilter(_)
        | PipelineError::NoPlatforms
        | PipelineError::EmptyContent => "validation_error",
        PipelineError::Scraper(ScraperError::UnknownPlatform { .. }) => "not_found",
        PipelineError::ExtractionUnavailable | PipelineError::Notify(NotifyError::Unconfigured) => {
            "service_unavailable"
        }
        PipelineError::Notify(_) => "bad_gateway",
        PipelineError::Extract(_) => "internal_error",
    };

    if error.is_caller_error() {
        tracing::debug!(error = %error, code, "request rejected");
    } else {
        tracing::warn!(error = %error, code, "request failed");
    }
    ApiError::new(request_id, code, error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/search", post(search::search))
        .route("/api/scrape/{platform}", post(search::scrape_platform))
        .route("/api/urls", post(search::search_urls))
        .route("/api/reset", post(search::reset))
        .route("/api/import", post(manual::import))
        .route("/api/analyze", post(manual::analyze))
        .route("/api/prompt", post(manual::prompt))
        .route("/api/telegram/test", post(telegram::send_test))
        .route("/api/telegram/detail", post(telegram::send_detail))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let pipeline = &state.pipeline;
    let status = |configured: bool| if configured { "configured" } else { "unconfigured" };

    ApiResponse::respond(
        HealthData {
            status: "ok",
            extraction: status(pipeline.extraction_configured()),
            notifications: status(pipeline.notifications_configured()),
            known_vehicles: pipeline.store().len(),
        },
        req_id,
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
