//! Metadata and payload checks applied at ingestion

use uuid::Uuid;

use crate::error::IngestError;
use crate::types::{MessageMetadata, MessageType, RocketEvent, RocketMessage};

/// Validate metadata and payload; returns the declared message type
pub fn validate_message(message: &RocketMessage) -> Result<MessageType, IngestError> {
    let message_type = validate_metadata(&message.metadata)?;
    validate_content(message_type, message)?;
    Ok(message_type)
}

/// Check the envelope fields
pub fn validate_metadata(metadata: &MessageMetadata) -> Result<MessageType, IngestError> {
    if Uuid::parse_str(&metadata.channel).is_err() {
        return Err(malformed(format!(
            "channel must be a valid UUID, got: {}",
            metadata.channel
        )));
    }

    if metadata.message_number <= 0 {
        return Err(malformed(format!(
            "messageNumber must be positive, got: {}",
            metadata.message_number
        )));
    }

    if metadata.message_type.is_empty() {
        return Err(malformed("messageType is required and cannot be empty"));
    }

    metadata.message_type.parse::<MessageType>().map_err(|_| {
        let expected: Vec<&str> = MessageType::ALL.iter().map(|t| t.as_str()).collect();
        malformed(format!(
            "messageType must be one of: {}, got: {}",
            expected.join(", "),
            metadata.message_type
        ))
    })
}

/// Check the payload against the declared message type
pub fn validate_content(
    message_type: MessageType,
    message: &RocketMessage,
) -> Result<(), IngestError> {
    if message.message.is_null() {
        return Err(malformed("message content is required"));
    }

    let event = RocketEvent::decode(message_type, &message.message)
        .map_err(|e| malformed(e.to_string()))?;

    match event {
        RocketEvent::Launched(launch) => {
            if launch.kind.is_empty() {
                return Err(malformed("RocketLaunched message: 'type' field is required"));
            }
            if launch.launch_speed < 0 {
                return Err(malformed(
                    "RocketLaunched message: 'launchSpeed' must be non-negative",
                ));
            }
            if launch.mission.is_empty() {
                return Err(malformed("RocketLaunched message: 'mission' field is required"));
            }
        }
        RocketEvent::SpeedIncreased(change) | RocketEvent::SpeedDecreased(change) => {
            if change.by <= 0 {
                return Err(malformed(format!(
                    "{} message: 'by' must be positive",
                    message_type
                )));
            }
        }
        RocketEvent::Exploded(exploded) => {
            if exploded.reason.is_empty() {
                return Err(malformed("RocketExploded message: 'reason' field is required"));
            }
        }
        RocketEvent::MissionChanged(change) => {
            if change.new_mission.is_empty() {
                return Err(malformed(
                    "RocketMissionChanged message: 'newMission' field is required",
                ));
            }
        }
    }

    Ok(())
}

fn malformed(reason: impl Into<String>) -> IngestError {
    IngestError::Malformed(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};

    const CHANNEL: &str = "193270a9-c9cf-404a-8f83-838e71d9ae67";

    fn message(number: i64, message_type: &str, payload: Value) -> RocketMessage {
        RocketMessage::new(CHANNEL, number, Utc::now(), message_type, payload)
    }

    fn assert_malformed(result: Result<MessageType, IngestError>, fragment: &str) {
        match result {
            Err(IngestError::Malformed(reason)) => {
                assert!(reason.contains(fragment), "unexpected reason: {}", reason)
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_launch_passes() {
        let msg = message(
            1,
            "RocketLaunched",
            json!({ "type": "Falcon-9", "launchSpeed": 500, "mission": "ARTEMIS" }),
        );
        assert_eq!(validate_message(&msg), Ok(MessageType::Launched));
    }

    #[test]
    fn test_channel_must_be_uuid() {
        let mut msg = message(1, "RocketExploded", json!({ "reason": "x" }));
        msg.metadata.channel = "not-a-uuid".to_string();
        assert_malformed(validate_message(&msg), "valid UUID");
    }

    #[test]
    fn test_message_number_must_be_positive() {
        let msg = message(0, "RocketExploded", json!({ "reason": "x" }));
        assert_malformed(validate_message(&msg), "messageNumber");
    }

    #[test]
    fn test_unknown_message_type() {
        let msg = message(1, "RocketLanded", json!({}));
        assert_malformed(validate_message(&msg), "messageType must be one of");
    }

    #[test]
    fn test_missing_content() {
        let msg = message(1, "RocketExploded", Value::Null);
        assert_malformed(validate_message(&msg), "content is required");
    }

    #[test]
    fn test_speed_delta_must_be_positive() {
        let msg = message(2, "RocketSpeedDecreased", json!({ "by": 0 }));
        assert_malformed(validate_message(&msg), "'by' must be positive");
    }

    #[test]
    fn test_launch_requires_fields() {
        let msg = message(
            1,
            "RocketLaunched",
            json!({ "type": "", "launchSpeed": 500, "mission": "ARTEMIS" }),
        );
        assert_malformed(validate_message(&msg), "'type' field is required");

        let msg = message(
            1,
            "RocketLaunched",
            json!({ "type": "Falcon-9", "launchSpeed": -1, "mission": "ARTEMIS" }),
        );
        assert_malformed(validate_message(&msg), "launchSpeed");
    }

    #[test]
    fn test_wrong_payload_shape() {
        let msg = message(3, "RocketMissionChanged", json!({ "mission": "X" }));
        assert_malformed(validate_message(&msg), "malformed RocketMissionChanged payload");
    }
}
