//! Reconciler - folds telemetry messages into rocket state
//!
//! For every message:
//!
//! 1. Look up the current record for the channel.
//! 2. Drop the message as stale if its number is `<=` the record's
//!    `last_message_number` (duplicate or out-of-order replay).
//! 3. Decode the payload for the declared type and compute the next state.
//! 4. Stamp `last_message_number` / `last_updated` and upsert.
//!
//! The reconciler is the only writer of the store, so the read in step 1 and
//! the write in step 4 cannot interleave with another write.

mod transitions;

pub use transitions::apply_event;

use std::sync::Arc;

use crate::bus::MessageHandler;
use crate::error::ReconcileError;
use crate::stats::PipelineCounters;
use crate::store::RocketStore;
use crate::types::RocketMessage;

/// Result of applying one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// State changed
    Applied,
    /// Message number was not newer than the stored one; nothing changed
    Stale { last_applied: i64 },
}

/// Applies messages to a `RocketStore` under per-rocket ordering rules
pub struct Reconciler {
    store: Arc<dyn RocketStore>,
    counters: Arc<PipelineCounters>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn RocketStore>, counters: Arc<PipelineCounters>) -> Self {
        Self { store, counters }
    }

    /// Apply one message to the store
    pub fn apply(&self, message: &RocketMessage) -> Result<ApplyOutcome, ReconcileError> {
        let channel = message.channel();
        let number = message.message_number();
        let current = self.store.get(channel).ok();

        if let Some(rocket) = &current {
            if number <= rocket.last_message_number {
                return Ok(ApplyOutcome::Stale {
                    last_applied: rocket.last_message_number,
                });
            }
        }

        let event = message.to_event()?;
        let message_type = event.message_type();

        let mut next = apply_event(channel, current, event)?;
        next.last_message_number = number;
        next.last_updated = message.metadata.message_time;

        tracing::info!(
            %channel,
            number,
            %message_type,
            speed = next.speed,
            mission = %next.mission,
            status = %next.status,
            "message applied"
        );

        self.store.upsert(next);
        Ok(ApplyOutcome::Applied)
    }
}

impl MessageHandler for Reconciler {
    fn handle(&self, message: RocketMessage) -> Result<(), ReconcileError> {
        match self.apply(&message) {
            Ok(ApplyOutcome::Applied) => {
                self.counters.record_applied();
                Ok(())
            }
            Ok(ApplyOutcome::Stale { last_applied }) => {
                self.counters.record_stale();
                tracing::debug!(
                    channel = %message.channel(),
                    number = message.message_number(),
                    last_applied,
                    "ignoring stale message"
                );
                Ok(())
            }
            Err(e) => {
                self.counters.record_failed();
                tracing::warn!(
                    channel = %message.channel(),
                    number = message.message_number(),
                    message_type = %message.metadata.message_type,
                    error = %e,
                    "message rejected"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::InMemoryRocketStore;
    use crate::types::RocketStatus;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::{json, Value};

    const R1: &str = "193270a9-c9cf-404a-8f83-838e71d9ae67";

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_643_827_145 + secs, 0).unwrap()
    }

    fn msg(number: i64, message_type: &str, payload: Value) -> RocketMessage {
        RocketMessage::new(R1, number, at(number), message_type, payload)
    }

    fn launch(number: i64) -> RocketMessage {
        msg(
            number,
            "RocketLaunched",
            json!({ "type": "Falcon-9", "launchSpeed": 500, "mission": "ARTEMIS" }),
        )
    }

    fn setup() -> (Reconciler, Arc<InMemoryRocketStore>, Arc<PipelineCounters>) {
        let store = Arc::new(InMemoryRocketStore::new());
        let counters = Arc::new(PipelineCounters::default());
        let reconciler = Reconciler::new(store.clone(), counters.clone());
        (reconciler, store, counters)
    }

    #[test]
    fn test_launch_then_increase() {
        let (reconciler, store, _) = setup();

        assert_eq!(reconciler.apply(&launch(1)), Ok(ApplyOutcome::Applied));
        let rocket = store.get(R1).unwrap();
        assert_eq!(rocket.speed, 500);
        assert_eq!(rocket.mission, "ARTEMIS");
        assert_eq!(rocket.status, RocketStatus::Active);
        assert_eq!(rocket.last_message_number, 1);
        assert_eq!(rocket.last_updated, at(1));

        reconciler
            .apply(&msg(2, "RocketSpeedIncreased", json!({ "by": 3000 })))
            .unwrap();
        let rocket = store.get(R1).unwrap();
        assert_eq!(rocket.speed, 3500);
        assert_eq!(rocket.last_message_number, 2);
    }

    #[test]
    fn test_duplicate_is_stale_noop() {
        let (reconciler, store, _) = setup();
        reconciler.apply(&launch(1)).unwrap();
        reconciler
            .apply(&msg(2, "RocketSpeedIncreased", json!({ "by": 3000 })))
            .unwrap();
        let before = store.get(R1).unwrap();

        assert_eq!(
            reconciler.apply(&launch(1)),
            Ok(ApplyOutcome::Stale { last_applied: 2 })
        );
        assert_eq!(store.get(R1).unwrap(), before);
    }

    #[test]
    fn test_stale_check_precedes_type_dispatch() {
        let (reconciler, _, _) = setup();
        reconciler.apply(&launch(3)).unwrap();

        // An unknown type with an old number is still just stale
        assert_eq!(
            reconciler.apply(&msg(2, "RocketLanded", json!({}))),
            Ok(ApplyOutcome::Stale { last_applied: 3 })
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let (reconciler, store, _) = setup();
        reconciler.apply(&launch(1)).unwrap();

        assert_eq!(
            reconciler.apply(&msg(2, "RocketLanded", json!({}))),
            Err(ReconcileError::UnknownMessageType("RocketLanded".to_string()))
        );
        assert_eq!(store.get(R1).unwrap().last_message_number, 1);
    }

    #[test]
    fn test_unknown_rocket_creates_no_placeholder() {
        let (reconciler, store, _) = setup();

        let result = reconciler.apply(&msg(1, "RocketSpeedIncreased", json!({ "by": 10 })));
        assert_eq!(result, Err(ReconcileError::UnknownRocket(R1.to_string())));
        assert_eq!(store.get(R1), Err(StoreError::NotFound(R1.to_string())));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_rejected_event_after_explosion_keeps_sequence() {
        let (reconciler, store, _) = setup();
        reconciler.apply(&launch(1)).unwrap();
        reconciler
            .apply(&msg(2, "RocketExploded", json!({ "reason": "PRESSURE_VESSEL_FAILURE" })))
            .unwrap();

        let result = reconciler.apply(&msg(3, "RocketSpeedIncreased", json!({ "by": 10 })));
        assert_eq!(result, Err(ReconcileError::RocketExploded(R1.to_string())));

        let rocket = store.get(R1).unwrap();
        assert_eq!(rocket.speed, 0);
        assert_eq!(rocket.status, RocketStatus::Exploded);
        assert_eq!(rocket.last_message_number, 2);
    }

    #[test]
    fn test_handler_counts_outcomes() {
        let (reconciler, _, counters) = setup();

        reconciler.handle(launch(1)).unwrap();
        reconciler.handle(launch(1)).unwrap();
        assert!(reconciler
            .handle(msg(2, "RocketMissionChanged", json!({ "mission": "wrong field" })))
            .is_err());

        let stats = counters.snapshot();
        assert_eq!(stats.applied, 1);
        assert_eq!(stats.stale, 1);
        assert_eq!(stats.failed, 1);
    }
}
