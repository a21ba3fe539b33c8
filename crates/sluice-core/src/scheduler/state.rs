//! Task state machine.

use serde::{Deserialize, Serialize};

/// Task state.
///
/// State transitions:
/// - Pending -> Executing -> Succeeded
/// - Pending -> Executing -> Pending (retry, loop until max_retries)
/// - Pending -> Executing -> Dead (retry budget exhausted)
///
/// A task counts toward batch completion only in a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// Waiting in the pending list for admission.
    Pending,

    /// Currently executing.
    Executing,

    /// Finished successfully.
    Succeeded,

    /// Failed permanently (retry budget exhausted).
    Dead,
}

impl TaskState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Dead)
    }

    /// Is this task eligible for admission?
    pub fn is_runnable(self) -> bool {
        matches!(self, TaskState::Pending)
    }
}
