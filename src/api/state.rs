//! Shared application state for HTTP handlers

use std::sync::Arc;

use crate::service::RocketService;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RocketService>,
}

impl AppState {
    pub fn new(service: Arc<RocketService>) -> Self {
        Self { service }
    }
}
