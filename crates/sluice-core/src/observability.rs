//! Counts and stats views for introspection.

use serde::{Deserialize, Serialize};

/// Snapshot of how many tasks sit in each state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerCounts {
    pub pending: usize,
    pub executing: usize,
    pub succeeded: usize,
    pub dead: usize,
}

/// Lifetime totals for a scheduler instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub total_submitted: u64,
    pub total_succeeded: u64,
    pub total_retries: u64,
    pub total_failed: u64,

    /// Largest executing-set size ever observed.
    pub peak_executing: usize,
}
