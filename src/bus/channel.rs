//! Event bus backed by a bounded tokio mpsc channel

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

use super::{EventBus, MessageHandler};
use crate::error::{BusError, PublishError};
use crate::types::RocketMessage;

/// Default buffer size
pub const DEFAULT_CAPACITY: usize = 100;

/// Channel-based bus with drop-on-full publishing
///
/// Closing drops the only sender, so the receiver yields the remaining
/// backlog and then ends.
pub struct ChannelBus {
    tx: RwLock<Option<mpsc::Sender<RocketMessage>>>,
    rx: Mutex<Option<mpsc::Receiver<RocketMessage>>>,
    capacity: usize,
}

impl ChannelBus {
    /// Create a bus buffering at most `capacity` messages (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx: RwLock::new(Some(tx)),
            rx: Mutex::new(Some(rx)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.tx.read().is_none()
    }
}

impl Default for ChannelBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl EventBus for ChannelBus {
    fn publish(&self, message: RocketMessage) -> Result<(), PublishError> {
        let guard = self.tx.read();
        let tx = guard.as_ref().ok_or(PublishError::Closed)?;

        let channel = message.metadata.channel.clone();
        let number = message.metadata.message_number;

        match tx.try_send(message) {
            Ok(()) => {
                tracing::debug!(%channel, number, "message published");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(%channel, number, capacity = self.capacity, "bus full, dropping message");
                Err(PublishError::BufferFull)
            }
            Err(TrySendError::Closed(_)) => Err(PublishError::Closed),
        }
    }

    async fn subscribe(
        &self,
        shutdown: CancellationToken,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), BusError> {
        let mut rx = self.rx.lock().take().ok_or(BusError::AlreadySubscribed)?;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    tracing::info!(backlog = rx.len(), "dispatch loop cancelled");
                    return Err(BusError::Cancelled);
                }

                message = rx.recv() => {
                    match message {
                        Some(message) => {
                            // Per-message failures are reported by the handler; keep consuming
                            if let Err(e) = handler.handle(message) {
                                tracing::debug!(error = %e, "handler rejected message");
                            }
                        }
                        None => {
                            tracing::info!("bus closed and drained, dispatch loop stopping");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn close(&self) {
        if self.tx.write().take().is_some() {
            tracing::info!("event bus closed");
        }
    }
}
