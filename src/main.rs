//! Rockets telemetry server - Binary Entry Point
//!
//! HTTP -> validation -> event bus -> async reconciler -> in-memory store

use std::sync::Arc;

use tokio::net::TcpListener;

use rocket_telemetry::api::{create_router, AppState};
use rocket_telemetry::bus::ChannelBus;
use rocket_telemetry::config::ServiceConfig;
use rocket_telemetry::service::RocketService;
use rocket_telemetry::store::InMemoryRocketStore;
use rocket_telemetry::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = ServiceConfig::from_env();
    init_tracing(&config.log_filter);

    tracing::info!(?config, "starting rockets server");

    let store = Arc::new(InMemoryRocketStore::new());
    let bus = Arc::new(ChannelBus::new(config.bus_capacity));
    let service = Arc::new(RocketService::start(store, bus));

    let app = create_router(AppState::new(Arc::clone(&service)));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // HTTP is down, so no new messages; apply what is already buffered
    service.stop().await?;
    tracing::info!(stats = ?service.stats(), "server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
