//! Error types: caller errors and terminal task failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TaskId;

/// Caller-facing errors from scheduler operations.
///
/// These are recoverable: nothing is enqueued and the scheduler keeps running.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("a batch must contain at least one task")]
    EmptyBatch,
}

/// Terminal failure of a single task: its retry budget is exhausted.
///
/// Recorded as that task's result in the batch output. A `TaskFailure` never
/// aborts the batch it belongs to, and never stops admission of other tasks.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{id} failed after {attempts} attempt(s): {message}")]
pub struct TaskFailure {
    pub id: TaskId,

    /// Total attempts made (initial run plus retries).
    pub attempts: u32,

    /// Error message from the final attempt.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_failure_display_names_the_task() {
        let failure = TaskFailure {
            id: TaskId::new(4),
            attempts: 3,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "task-4 failed after 3 attempt(s): connection refused"
        );
    }
}
