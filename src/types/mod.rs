//! Data types for the rocket telemetry service
//!
//! This module contains the inbound message model and the rocket state record.

mod message;
mod rocket;

pub use message::{
    ExplodedPayload, LaunchedPayload, MessageMetadata, MessageType, MissionChangedPayload,
    RocketEvent, RocketMessage, SpeedChangedPayload,
};
pub use rocket::{Rocket, RocketStatus};
