//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Construction-time configuration for [`Scheduler`](crate::Scheduler).
///
/// All fields have defaults, so partial configs deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum number of tasks in the executing set at once.
    /// 0 means unbounded.
    pub concurrency: usize,

    /// Start paused: nothing is admitted until `resume()` is called.
    pub start_paused: bool,

    /// Re-queue attempts per task before a failure is terminal.
    /// 0 means no retries.
    pub max_retries: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            concurrency: 0,
            start_paused: false,
            max_retries: 0,
        }
    }
}

impl SchedulerConfig {
    /// Whether another task may be admitted given the current executing count.
    pub fn has_capacity(&self, executing: usize) -> bool {
        self.concurrency == 0 || executing < self.concurrency
    }
}
