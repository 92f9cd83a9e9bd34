//! Rocket query endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ApiError;
use crate::api::state::AppState;
use crate::service::SortKey;
use crate::types::Rocket;

/// Query parameters for listing rockets
#[derive(Debug, Deserialize)]
pub struct ListRocketsParams {
    /// Sort by field (id, type, speed, mission, status)
    pub sort: Option<String>,
}

/// Response for GET /rockets
#[derive(Debug, Serialize)]
pub struct RocketList {
    pub count: usize,
    pub rockets: Vec<Rocket>,
    #[serde(rename = "sortBy")]
    pub sort_by: String,
}

/// GET /rockets - List all rockets
pub async fn list_rockets(
    State(state): State<AppState>,
    Query(params): Query<ListRocketsParams>,
) -> Response {
    let sort = match params.sort.as_deref().map(str::parse::<SortKey>) {
        None => SortKey::default(),
        Some(Ok(sort)) => sort,
        Some(Err(message)) => {
            return (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(message))).into_response()
        }
    };

    let rockets = state.service.list_rockets(sort);
    Json(RocketList {
        count: rockets.len(),
        rockets,
        sort_by: sort.to_string(),
    })
    .into_response()
}

/// GET /rockets/:id - Get a single rocket
pub async fn get_rocket(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    if Uuid::parse_str(&id).is_err() {
        let error = ApiError::bad_request(format!("rocket id must be a valid UUID, got: {}", id));
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    match state.service.get_rocket(&id) {
        Ok(rocket) => (StatusCode::OK, Json(rocket)).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, Json(ApiError::not_found(e.to_string()))).into_response(),
    }
}
