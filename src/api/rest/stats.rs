//! Pipeline statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;
use crate::stats::PipelineStats;

/// Response for GET /stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub rockets: usize,
    #[serde(flatten)]
    pub pipeline: PipelineStats,
    pub in_flight: u64,
}

/// GET /stats - Pipeline counters and rocket count
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let pipeline = state.service.stats();
    Json(StatsResponse {
        rockets: state.service.rocket_count(),
        pipeline,
        in_flight: pipeline.in_flight(),
    })
}
