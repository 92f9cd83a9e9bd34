//! Error types for the telemetry pipeline

use thiserror::Error;

use crate::types::MessageType;

/// Errors returned by a rocket store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("rocket not found: {0}")]
    NotFound(String),
}

/// Errors returned when publishing onto the event bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The bounded buffer is full; the message was dropped
    #[error("event bus buffer is full")]
    BufferFull,
    #[error("event bus is closed")]
    Closed,
}

/// Errors returned by the dispatch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("dispatch loop cancelled")]
    Cancelled,
    #[error("event bus already has a subscriber")]
    AlreadySubscribed,
}

/// Outcome of a rejected ingest call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("malformed message: {0}")]
    Malformed(String),
    #[error("event bus buffer is full")]
    BufferFull,
    #[error("event bus is closed")]
    Closed,
}

impl From<PublishError> for IngestError {
    fn from(e: PublishError) -> Self {
        match e {
            PublishError::BufferFull => IngestError::BufferFull,
            PublishError::Closed => IngestError::Closed,
        }
    }
}

/// Per-message failures inside the reconciler
///
/// None of these stop the dispatch loop; the offending message is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("unknown message type: {0}")]
    UnknownMessageType(String),
    #[error("malformed {message_type} payload: {reason}")]
    MalformedPayload {
        message_type: MessageType,
        reason: String,
    },
    #[error("rocket not found: {0}")]
    UnknownRocket(String),
    #[error("rocket {0} has exploded")]
    RocketExploded(String),
}

/// Errors surfaced when shutting down the service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Bus(#[from] BusError),
    #[error("dispatch task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;
