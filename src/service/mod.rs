//! Rocket service - owner of the ingestion pipeline
//!
//! `RocketService` wires a store, a bus and the reconciler together and owns
//! the background dispatch task:
//!
//! ```text
//! publish_message() ─► validate ─► EventBus ─► dispatch task ─► Reconciler ─► RocketStore
//!                                                                                  ▲
//! get_rocket() / list_rockets() / rocket_count() ──────────────────────────────────┘
//! ```
//!
//! Ingest returns as soon as the bus accepts or rejects the message; callers
//! never learn whether reconciliation later succeeded.

mod query;

pub use query::{sort_rockets, SortKey};

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bus::{EventBus, MessageHandler};
use crate::error::{BusError, IngestError, ServiceError, StoreResult};
use crate::reconciler::Reconciler;
use crate::stats::{PipelineCounters, PipelineStats};
use crate::store::RocketStore;
use crate::types::{Rocket, RocketMessage};
use crate::validation::validate_message;

/// Ingestion pipeline plus read-only query facade
pub struct RocketService {
    store: Arc<dyn RocketStore>,
    bus: Arc<dyn EventBus>,
    counters: Arc<PipelineCounters>,
    shutdown: CancellationToken,
    worker: Mutex<Option<JoinHandle<Result<(), BusError>>>>,
}

impl RocketService {
    /// Build the pipeline and spawn the dispatch task
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(store: Arc<dyn RocketStore>, bus: Arc<dyn EventBus>) -> Self {
        let counters = Arc::new(PipelineCounters::default());
        let reconciler: Arc<dyn MessageHandler> =
            Arc::new(Reconciler::new(Arc::clone(&store), Arc::clone(&counters)));
        let shutdown = CancellationToken::new();

        let worker = {
            let bus = Arc::clone(&bus);
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                tracing::info!("message processor started");
                let result = bus.subscribe(shutdown, reconciler).await;
                tracing::info!(?result, "message processor stopped");
                result
            })
        };

        Self {
            store,
            bus,
            counters,
            shutdown,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Validate and enqueue a message without waiting for reconciliation
    pub fn publish_message(&self, message: RocketMessage) -> Result<(), IngestError> {
        if let Err(e) = validate_message(&message) {
            self.counters.record_malformed();
            tracing::warn!(channel = %message.channel(), error = %e, "rejecting message");
            return Err(e);
        }

        match self.bus.publish(message) {
            Ok(()) => {
                self.counters.record_accepted();
                Ok(())
            }
            Err(e) => {
                self.counters.record_shed();
                Err(e.into())
            }
        }
    }

    pub fn get_rocket(&self, id: &str) -> StoreResult<Rocket> {
        self.store.get(id)
    }

    /// All rockets ordered by `sort`
    pub fn list_rockets(&self, sort: SortKey) -> Vec<Rocket> {
        let mut rockets = self.store.list();
        sort_rockets(&mut rockets, sort);
        rockets
    }

    pub fn rocket_count(&self) -> usize {
        self.store.count()
    }

    pub fn stats(&self) -> PipelineStats {
        self.counters.snapshot()
    }

    /// Stop accepting messages and wait for the backlog to be applied
    pub async fn stop(&self) -> Result<(), ServiceError> {
        tracing::info!("stopping rocket service");
        self.bus.close();
        self.join().await
    }

    /// Cancel the dispatch task without draining the backlog
    ///
    /// Resolves to `Err(ServiceError::Bus(BusError::Cancelled))` when the
    /// task was still running.
    pub async fn abort(&self) -> Result<(), ServiceError> {
        tracing::info!("aborting rocket service");
        self.shutdown.cancel();
        self.bus.close();
        self.join().await
    }

    /// Wait for the dispatch task; later calls return `Ok(())` immediately
    async fn join(&self) -> Result<(), ServiceError> {
        let worker = self.worker.lock().take();
        match worker {
            Some(handle) => Ok(handle.await??),
            None => Ok(()),
        }
    }
}

impl Drop for RocketService {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
