//! HTTP server setup with Axum

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{messages, rockets, stats};
use super::state::AppState;

/// Response for GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Create the Axum router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/messages", post(messages::post_message))
        .route("/rockets", get(rockets::list_rockets))
        .route("/rockets/:id", get(rockets::get_rocket))
        .route("/stats", get(stats::get_stats))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "rockets",
    })
}
