//! Rocket state record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a rocket
///
/// Variant order is the sort order used by `GET /rockets?sort=status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RocketStatus {
    Active,
    Exploded,
}

impl std::fmt::Display for RocketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RocketStatus::Active => write!(f, "ACTIVE"),
            RocketStatus::Exploded => write!(f, "EXPLODED"),
        }
    }
}

/// Current state of one rocket, keyed by its channel id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub speed: i64,
    pub mission: String,
    pub status: RocketStatus,
    #[serde(rename = "explosionReason", skip_serializing_if = "Option::is_none", default)]
    pub explosion_reason: Option<String>,
    /// Highest message number applied to this record
    #[serde(rename = "lastMessageNumber")]
    pub last_message_number: i64,
    /// Time carried by the most recently applied message
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

impl Rocket {
    /// Create a freshly launched rocket
    pub fn launched(
        id: impl Into<String>,
        kind: impl Into<String>,
        speed: i64,
        mission: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            speed,
            mission: mission.into(),
            status: RocketStatus::Active,
            explosion_reason: None,
            last_message_number: 0,
            last_updated: DateTime::<Utc>::default(),
        }
    }

    pub fn is_exploded(&self) -> bool {
        self.status == RocketStatus::Exploded
    }
}
