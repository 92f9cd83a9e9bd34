//! Per-message-type state transitions
//!
//! Each function takes the current record (if any) and returns the next one.
//! Sequence bookkeeping is done by the caller.

use crate::error::ReconcileError;
use crate::types::{
    ExplodedPayload, LaunchedPayload, MissionChangedPayload, Rocket, RocketEvent, RocketStatus,
    SpeedChangedPayload,
};

/// Compute the next state of `id` after `event`
pub fn apply_event(
    id: &str,
    current: Option<Rocket>,
    event: RocketEvent,
) -> Result<Rocket, ReconcileError> {
    // Exploded is terminal: nothing, not even a relaunch, may revive the record
    if let Some(rocket) = current.as_ref().filter(|r| r.is_exploded()) {
        return Err(ReconcileError::RocketExploded(rocket.id.clone()));
    }

    match event {
        RocketEvent::Launched(payload) => Ok(launch(id, payload)),
        RocketEvent::SpeedIncreased(payload) => Ok(change_speed(require(id, current)?, payload, 1)),
        RocketEvent::SpeedDecreased(payload) => {
            Ok(change_speed(require(id, current)?, payload, -1))
        }
        RocketEvent::Exploded(payload) => Ok(explode(require(id, current)?, payload)),
        RocketEvent::MissionChanged(payload) => {
            Ok(change_mission(require(id, current)?, payload))
        }
    }
}

fn require(id: &str, current: Option<Rocket>) -> Result<Rocket, ReconcileError> {
    current.ok_or_else(|| ReconcileError::UnknownRocket(id.to_string()))
}

/// Build a fresh ACTIVE record; an existing record is overwritten
fn launch(id: &str, payload: LaunchedPayload) -> Rocket {
    Rocket::launched(id, payload.kind, payload.launch_speed, payload.mission)
}

/// Add (`sign` = 1) or subtract (`sign` = -1) the payload magnitude
fn change_speed(mut rocket: Rocket, payload: SpeedChangedPayload, sign: i64) -> Rocket {
    rocket.speed = rocket.speed.saturating_add(payload.by.saturating_mul(sign));
    rocket
}

fn explode(mut rocket: Rocket, payload: ExplodedPayload) -> Rocket {
    rocket.status = RocketStatus::Exploded;
    rocket.explosion_reason = Some(payload.reason);
    rocket.speed = 0;
    rocket
}

fn change_mission(mut rocket: Rocket, payload: MissionChangedPayload) -> Rocket {
    rocket.mission = payload.new_mission;
    rocket
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> Rocket {
        Rocket::launched("r1", "Falcon-9", 500, "ARTEMIS")
    }

    #[test]
    fn test_launch_creates_active_record() {
        let rocket = apply_event(
            "r1",
            None,
            RocketEvent::Launched(LaunchedPayload {
                kind: "Falcon-9".to_string(),
                launch_speed: 500,
                mission: "ARTEMIS".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(rocket.id, "r1");
        assert_eq!(rocket.status, RocketStatus::Active);
        assert_eq!(rocket.speed, 500);
    }

    #[test]
    fn test_speed_changes_require_existing_rocket() {
        let result = apply_event(
            "r404",
            None,
            RocketEvent::SpeedIncreased(SpeedChangedPayload { by: 10 }),
        );
        assert_eq!(result, Err(ReconcileError::UnknownRocket("r404".to_string())));
    }

    #[test]
    fn test_speed_decrease_can_go_negative() {
        let rocket = apply_event(
            "r1",
            Some(active()),
            RocketEvent::SpeedDecreased(SpeedChangedPayload { by: 800 }),
        )
        .unwrap();
        assert_eq!(rocket.speed, -300);
    }

    #[test]
    fn test_speed_saturates_instead_of_overflowing() {
        let mut rocket = active();
        rocket.speed = i64::MAX - 1;
        let rocket = apply_event(
            "r1",
            Some(rocket),
            RocketEvent::SpeedIncreased(SpeedChangedPayload { by: 10 }),
        )
        .unwrap();
        assert_eq!(rocket.speed, i64::MAX);
    }

    #[test]
    fn test_explode_zeroes_speed() {
        let rocket = apply_event(
            "r1",
            Some(active()),
            RocketEvent::Exploded(ExplodedPayload {
                reason: "PRESSURE_VESSEL_FAILURE".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(rocket.status, RocketStatus::Exploded);
        assert_eq!(rocket.speed, 0);
        assert_eq!(rocket.explosion_reason.as_deref(), Some("PRESSURE_VESSEL_FAILURE"));
    }

    #[test]
    fn test_mission_change_touches_only_mission() {
        let rocket = apply_event(
            "r1",
            Some(active()),
            RocketEvent::MissionChanged(MissionChangedPayload {
                new_mission: "SHUTTLE_MIR".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(rocket.mission, "SHUTTLE_MIR");
        assert_eq!(rocket.speed, 500);
        assert_eq!(rocket.kind, "Falcon-9");
    }

    #[test]
    fn test_exploded_rocket_rejects_everything() {
        let mut exploded = active();
        exploded.status = RocketStatus::Exploded;
        exploded.speed = 0;

        let events = vec![
            RocketEvent::SpeedIncreased(SpeedChangedPayload { by: 1 }),
            RocketEvent::MissionChanged(MissionChangedPayload {
                new_mission: "X".to_string(),
            }),
            RocketEvent::Launched(LaunchedPayload {
                kind: "Falcon-9".to_string(),
                launch_speed: 10,
                mission: "Y".to_string(),
            }),
        ];

        for event in events {
            assert_eq!(
                apply_event("r1", Some(exploded.clone()), event),
                Err(ReconcileError::RocketExploded("r1".to_string()))
            );
        }
    }
}
