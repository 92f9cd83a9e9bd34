//! Pipeline counters
//!
//! Stale messages are counted apart from failures so duplicate delivery does
//! not look like an error rate.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Live counters shared by the ingest path and the reconciler
#[derive(Debug, Default)]
pub struct PipelineCounters {
    accepted: AtomicU64,
    shed: AtomicU64,
    malformed: AtomicU64,
    applied: AtomicU64,
    stale: AtomicU64,
    failed: AtomicU64,
}

impl PipelineCounters {
    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_shed(&self) {
        self.shed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_applied(&self) {
        self.applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale(&self) {
        self.stale.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            shed: self.shed.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            applied: self.applied.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the pipeline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Messages handed to the bus
    pub accepted: u64,
    /// Messages dropped because the bus was full or closed
    pub shed: u64,
    /// Messages rejected by ingest validation
    pub malformed: u64,
    /// Messages folded into a rocket record
    pub applied: u64,
    /// Duplicates and out-of-order replays ignored by the reconciler
    pub stale: u64,
    /// Messages the reconciler rejected
    pub failed: u64,
}

impl PipelineStats {
    /// Accepted messages the reconciler has not yet reached
    pub fn in_flight(&self) -> u64 {
        self.accepted
            .saturating_sub(self.applied + self.stale + self.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_records() {
        let counters = PipelineCounters::default();
        counters.record_accepted();
        counters.record_accepted();
        counters.record_applied();
        counters.record_stale();
        counters.record_shed();

        let stats = counters.snapshot();
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.applied, 1);
        assert_eq!(stats.stale, 1);
        assert_eq!(stats.shed, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.in_flight(), 0);
    }
}
