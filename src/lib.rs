//! Rocket Telemetry Service
//!
//! Ingests out-of-order, at-least-once rocket telemetry messages and keeps an
//! eventually consistent current-state record per rocket.
//!
//! # Features
//!
//! - **Non-blocking ingest**: messages are validated and queued; a full buffer sheds
//! - **Per-rocket ordering**: stale and duplicate messages are ignored by message number
//! - **Thread-Safe**: `RwLock`-guarded in-memory store, one background writer
//! - **Deterministic shutdown**: graceful drain or hard cancel of the dispatch task
//!
//! # Modules
//!
//! - `types`: Wire message and rocket record types
//! - `store`: `RocketStore` trait and the in-memory implementation
//! - `bus`: `EventBus` trait and the bounded channel implementation
//! - `reconciler`: Applies messages to the store
//! - `service`: Pipeline owner and query facade
//! - `validation`: Ingest-time shape checks
//! - `api`: Axum HTTP adapter
//! - `config`, `telemetry`, `stats`, `error`: Ambient plumbing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rocket_telemetry::{ChannelBus, InMemoryRocketStore, RocketService, SortKey};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = RocketService::start(
//!         Arc::new(InMemoryRocketStore::new()),
//!         Arc::new(ChannelBus::new(100)),
//!     );
//!     // ... publish_message() from request handlers ...
//!     service.stop().await.unwrap();
//!     println!("{} rockets", service.list_rockets(SortKey::Speed).len());
//! }
//! ```

pub mod api;
pub mod bus;
pub mod config;
pub mod error;
pub mod reconciler;
pub mod service;
pub mod stats;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use bus::{ChannelBus, EventBus, MessageHandler};
pub use error::{BusError, IngestError, PublishError, ReconcileError, ServiceError, StoreError};
pub use reconciler::{ApplyOutcome, Reconciler};
pub use service::{RocketService, SortKey};
pub use stats::PipelineStats;
pub use store::{InMemoryRocketStore, RocketStore};
pub use types::{MessageType, Rocket, RocketEvent, RocketMessage, RocketStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
