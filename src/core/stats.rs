//! Statistics dashboard state. One snapshot per aggregation period, replaced
//! wholesale by each accepted refresh cycle; the same seq guard as the live
//! list keeps a slow cycle from overwriting a newer one.

use std::collections::HashMap;

use crate::api::{StatsPeriod, StatsSnapshot};

#[derive(Debug, Default)]
pub struct StatsState {
    snapshots: HashMap<StatsPeriod, StatsSnapshot>,
    last_seq: u64,
}

impl StatsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest snapshot for a period; zeroed until the first refresh,
    /// matching the dashboard's "treat absent as zero" rule.
    pub fn snapshot(&self, period: StatsPeriod) -> StatsSnapshot {
        self.snapshots.get(&period).copied().unwrap_or_default()
    }

    /// Replaces all snapshots if this refresh cycle is newer than the last
    /// applied one. Returns false for stale cycles.
    pub fn apply(&mut self, seq: u64, snapshots: Vec<(StatsPeriod, StatsSnapshot)>) -> bool {
        if seq <= self.last_seq && self.last_seq != 0 {
            return false;
        }
        self.last_seq = seq;
        self.snapshots = snapshots.into_iter().collect();
        true
    }
}
