//! Rocket state storage
//!
//! `RocketStore` is the capability set the reconciler and the query facade
//! need. `InMemoryRocketStore` is the process-scoped implementation; nothing
//! is persisted across restarts.

mod memory;

pub use memory::InMemoryRocketStore;

use crate::error::StoreResult;
use crate::types::Rocket;

/// Thread-safe storage of one current-state record per rocket id
///
/// Every operation is individually atomic. Reads hand out copies, so callers
/// can never observe or cause a partial write.
pub trait RocketStore: Send + Sync {
    /// Insert or replace the record keyed by `rocket.id`
    fn upsert(&self, rocket: Rocket);

    /// Copy of the record for `id`
    fn get(&self, id: &str) -> StoreResult<Rocket>;

    /// Snapshot of all records ordered by id ascending
    fn list(&self) -> Vec<Rocket>;

    /// Number of distinct rocket ids
    fn count(&self) -> usize;
}
