//! Message ingestion endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::ApiError;
use crate::api::state::AppState;
use crate::error::IngestError;
use crate::types::RocketMessage;

/// Body returned for an accepted message
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// POST /messages - Queue a telemetry message for processing
///
/// Returns 202 as soon as the message is on the bus.
pub async fn post_message(
    State(state): State<AppState>,
    payload: Result<Json<RocketMessage>, JsonRejection>,
) -> Response {
    let Json(message) = match payload {
        Ok(message) => message,
        Err(rejection) => {
            let error = ApiError::bad_request(format!(
                "request body must be a valid RocketMessage: {}",
                rejection.body_text()
            ));
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state.service.publish_message(message) {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(AcceptedResponse {
                status: "accepted",
                message: "Message queued for processing",
            }),
        )
            .into_response(),
        Err(IngestError::Malformed(reason)) => {
            (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(reason))).into_response()
        }
        Err(IngestError::BufferFull) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::buffer_full(
                "message buffer is full, the message was dropped",
            )),
        )
            .into_response(),
        Err(IngestError::Closed) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::unavailable("service is shutting down")),
        )
            .into_response(),
    }
}
