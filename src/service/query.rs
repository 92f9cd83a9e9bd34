//! Sorting for the rocket list query

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Rocket;

/// Field to order `list_rockets` by
///
/// All orders are ascending. Sorting is stable over the id-ordered store
/// snapshot, so equal keys stay ordered by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    #[serde(rename = "type", alias = "kind")]
    Kind,
    Speed,
    Mission,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Id,
        SortKey::Kind,
        SortKey::Speed,
        SortKey::Mission,
        SortKey::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Kind => "type",
            SortKey::Speed => "speed",
            SortKey::Mission => "mission",
            SortKey::Status => "status",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "type" | "kind" => Ok(SortKey::Kind),
            "speed" => Ok(SortKey::Speed),
            "mission" => Ok(SortKey::Mission),
            "status" => Ok(SortKey::Status),
            other => Err(format!(
                "sort parameter must be one of: id, type, speed, mission, status, got: {}",
                other
            )),
        }
    }
}

/// Reorder an id-ordered snapshot by `key`
pub fn sort_rockets(rockets: &mut [Rocket], key: SortKey) {
    match key {
        SortKey::Id => rockets.sort_by(|a, b| a.id.cmp(&b.id)),
        SortKey::Kind => rockets.sort_by(|a, b| a.kind.cmp(&b.kind)),
        SortKey::Speed => rockets.sort_by_key(|r| r.speed),
        SortKey::Mission => rockets.sort_by(|a, b| a.mission.cmp(&b.mission)),
        SortKey::Status => rockets.sort_by_key(|r| r.status),
    }
}
