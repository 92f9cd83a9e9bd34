//! HTTP API module
//!
//! Thin axum adapter over `RocketService`: message ingestion plus read-only
//! rocket queries.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
