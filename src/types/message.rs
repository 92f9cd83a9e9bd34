//! Inbound telemetry message types
//!
//! A `RocketMessage` is what arrives on the wire: metadata plus an untyped
//! payload. The payload is only decoded into a `RocketEvent` once the message
//! type is known, so unknown types and malformed payloads can be reported
//! separately.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ReconcileError;

/// Closed set of telemetry message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "RocketLaunched")]
    Launched,
    #[serde(rename = "RocketSpeedIncreased")]
    SpeedIncreased,
    #[serde(rename = "RocketSpeedDecreased")]
    SpeedDecreased,
    #[serde(rename = "RocketExploded")]
    Exploded,
    #[serde(rename = "RocketMissionChanged")]
    MissionChanged,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::Launched,
        MessageType::SpeedIncreased,
        MessageType::SpeedDecreased,
        MessageType::Exploded,
        MessageType::MissionChanged,
    ];

    /// Wire name of the message type
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Launched => "RocketLaunched",
            MessageType::SpeedIncreased => "RocketSpeedIncreased",
            MessageType::SpeedDecreased => "RocketSpeedDecreased",
            MessageType::Exploded => "RocketExploded",
            MessageType::MissionChanged => "RocketMissionChanged",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ReconcileError::UnknownMessageType(s.to_string()))
    }
}

/// Message envelope metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Rocket id
    pub channel: String,
    /// Per-channel ordering key
    #[serde(rename = "messageNumber")]
    pub message_number: i64,
    #[serde(rename = "messageTime")]
    pub message_time: DateTime<Utc>,
    /// Kept as a string so unknown types survive decoding and are rejected downstream
    #[serde(rename = "messageType")]
    pub message_type: String,
}

/// Telemetry message as received from a producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketMessage {
    pub metadata: MessageMetadata,
    #[serde(default)]
    pub message: Value,
}

impl RocketMessage {
    pub fn new(
        channel: impl Into<String>,
        message_number: i64,
        message_time: DateTime<Utc>,
        message_type: impl Into<String>,
        message: Value,
    ) -> Self {
        Self {
            metadata: MessageMetadata {
                channel: channel.into(),
                message_number,
                message_time,
                message_type: message_type.into(),
            },
            message,
        }
    }

    pub fn channel(&self) -> &str {
        &self.metadata.channel
    }

    pub fn message_number(&self) -> i64 {
        self.metadata.message_number
    }

    /// Decode the payload according to the declared message type
    pub fn to_event(&self) -> Result<RocketEvent, ReconcileError> {
        let message_type: MessageType = self.metadata.message_type.parse()?;
        RocketEvent::decode(message_type, &self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchedPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "launchSpeed")]
    pub launch_speed: i64,
    pub mission: String,
}

/// Speed delta; always a magnitude, the message type decides the sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedChangedPayload {
    pub by: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodedPayload {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionChangedPayload {
    #[serde(rename = "newMission")]
    pub new_mission: String,
}

/// Typed view of a message payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RocketEvent {
    Launched(LaunchedPayload),
    SpeedIncreased(SpeedChangedPayload),
    SpeedDecreased(SpeedChangedPayload),
    Exploded(ExplodedPayload),
    MissionChanged(MissionChangedPayload),
}

impl RocketEvent {
    /// Decode a raw payload for a known message type
    pub fn decode(message_type: MessageType, payload: &Value) -> Result<Self, ReconcileError> {
        let malformed = |e: serde_json::Error| ReconcileError::MalformedPayload {
            message_type,
            reason: e.to_string(),
        };

        let event = match message_type {
            MessageType::Launched => {
                RocketEvent::Launched(LaunchedPayload::deserialize(payload).map_err(malformed)?)
            }
            MessageType::SpeedIncreased => RocketEvent::SpeedIncreased(
                SpeedChangedPayload::deserialize(payload).map_err(malformed)?,
            ),
            MessageType::SpeedDecreased => RocketEvent::SpeedDecreased(
                SpeedChangedPayload::deserialize(payload).map_err(malformed)?,
            ),
            MessageType::Exploded => {
                RocketEvent::Exploded(ExplodedPayload::deserialize(payload).map_err(malformed)?)
            }
            MessageType::MissionChanged => RocketEvent::MissionChanged(
                MissionChangedPayload::deserialize(payload).map_err(malformed)?,
            ),
        };

        Ok(event)
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            RocketEvent::Launched(_) => MessageType::Launched,
            RocketEvent::SpeedIncreased(_) => MessageType::SpeedIncreased,
            RocketEvent::SpeedDecreased(_) => MessageType::SpeedDecreased,
            RocketEvent::Exploded(_) => MessageType::Exploded,
            RocketEvent::MissionChanged(_) => MessageType::MissionChanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_message() {
        let raw = json!({
            "metadata": {
                "channel": "193270a9-c9cf-404a-8f83-838e71d9ae67",
                "messageNumber": 1,
                "messageTime": "2022-02-02T19:39:05.86337+01:00",
                "messageType": "RocketLaunched"
            },
            "message": { "type": "Falcon-9", "launchSpeed": 500, "mission": "ARTEMIS" }
        });

        let msg: RocketMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.message_number(), 1);

        let event = msg.to_event().unwrap();
        assert_eq!(
            event,
            RocketEvent::Launched(LaunchedPayload {
                kind: "Falcon-9".to_string(),
                launch_speed: 500,
                mission: "ARTEMIS".to_string(),
            })
        );
    }

    #[test]
    fn test_message_type_from_str() {
        assert_eq!(
            "RocketSpeedDecreased".parse::<MessageType>().unwrap(),
            MessageType::SpeedDecreased
        );
        assert!(matches!(
            "RocketLanded".parse::<MessageType>(),
            Err(ReconcileError::UnknownMessageType(t)) if t == "RocketLanded"
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_payload_shape() {
        let result = RocketEvent::decode(MessageType::SpeedIncreased, &json!({ "reason": "x" }));
        assert!(matches!(
            result,
            Err(ReconcileError::MalformedPayload { message_type: MessageType::SpeedIncreased, .. })
        ));
    }

    #[test]
    fn test_missing_message_time_fails_decoding() {
        let raw = json!({
            "metadata": {
                "channel": "193270a9-c9cf-404a-8f83-838e71d9ae67",
                "messageNumber": 1,
                "messageType": "RocketExploded"
            },
            "message": { "reason": "x" }
        });
        assert!(serde_json::from_value::<RocketMessage>(raw).is_err());
    }
}
