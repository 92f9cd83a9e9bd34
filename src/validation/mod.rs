//! Shape validation for inbound telemetry messages
//!
//! This module checks structure only; ordering and existence rules belong to
//! the reconciler.

mod message;

pub use message::{validate_content, validate_message, validate_metadata};
