//! In-process event bus between ingestion and the reconciler
//!
//! ```text
//! producers ──publish()──► bounded buffer ──► dispatch loop ──► MessageHandler
//!   (many, never block)     (sheds when full)   (one task)       (reconciler)
//! ```
//!
//! Messages from one producer reach the handler in publish order. Nothing is
//! promised across producers; per-rocket ordering is the reconciler's job.

mod channel;

pub use channel::{ChannelBus, DEFAULT_CAPACITY};

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{BusError, PublishError, ReconcileError};
use crate::types::RocketMessage;

/// Consumer side of the bus, invoked once per delivered message
pub trait MessageHandler: Send + Sync {
    fn handle(&self, message: RocketMessage) -> Result<(), ReconcileError>;
}

/// Bounded single-consumer message conduit
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Enqueue without blocking; a full buffer drops the message
    fn publish(&self, message: RocketMessage) -> Result<(), PublishError>;

    /// Run the dispatch loop until the bus is closed and drained (`Ok`) or
    /// `shutdown` is cancelled (`Err(BusError::Cancelled)`).
    ///
    /// Only one subscriber is allowed for the lifetime of the bus.
    async fn subscribe(
        &self,
        shutdown: CancellationToken,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), BusError>;

    /// Stop accepting messages. Idempotent.
    fn close(&self);
}
