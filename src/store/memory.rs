//! In-memory rocket store guarded by a single reader-writer lock

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::RocketStore;
use crate::error::{StoreError, StoreResult};
use crate::types::Rocket;

/// Coarse-locked map of rockets
///
/// Readers share the lock; `upsert` takes it exclusively. The map is ordered
/// by id so `list` needs no extra sort.
#[derive(Debug, Default)]
pub struct InMemoryRocketStore {
    rockets: RwLock<BTreeMap<String, Rocket>>,
}

impl InMemoryRocketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RocketStore for InMemoryRocketStore {
    fn upsert(&self, rocket: Rocket) {
        self.rockets.write().insert(rocket.id.clone(), rocket);
    }

    fn get(&self, id: &str) -> StoreResult<Rocket> {
        self.rockets
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Vec<Rocket> {
        self.rockets.read().values().cloned().collect()
    }

    fn count(&self) -> usize {
        self.rockets.read().len()
    }
}
