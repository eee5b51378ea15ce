use autoscan_core::VehicleRecord;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_pipeline_error, parse_body, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct TestMessageResponse {
    pub sent: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct DetailRequest {
    pub vehicle: VehicleRecord,
}

/// POST /api/telegram/test: send the probe message to the configured chat.
pub(super) async fn send_test(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<TestMessageResponse>>, ApiError> {
    state
        .pipeline
        .send_test_message()
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, &e))?;

    Ok(ApiResponse::respond(TestMessageResponse { sent: true }, req_id))
}

/// POST /api/telegram/detail: send one listing with all of its fields.
///
/// `sent` is false when Telegram rejected the message.
pub(super) async fn send_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<DetailRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TestMessageResponse>>, ApiError> {
    let request = parse_body(&req_id.0, body)?;
    let sent = state
        .pipeline
        .send_vehicle_detail(&request.vehicle)
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, &e))?;

    Ok(ApiResponse::respond(TestMessageResponse { sent }, req_id))
}
