//! Task records: retry bookkeeping and completed results.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::state::TaskState;
use crate::action::Action;
use crate::error::TaskFailure;
use crate::ids::TaskId;

/// A submitted task that is pending or executing.
///
/// Design:
/// - This is the single source of truth for a task's retry bookkeeping.
/// - The executing set holds ids only; the record itself travels into the
///   spawned execution and comes back to the pending list on retry, so its
///   id and retry count survive across attempts.
pub struct TaskRecord<T> {
    pub id: TaskId,
    pub action: Arc<dyn Action<T>>,
    pub state: TaskState,

    /// Re-queues consumed so far. Capped by `max_retries`.
    pub retries: u32,

    /// Timestamps for observability.
    pub created_at: Instant,
    pub updated_at: Instant,
}

impl<T> TaskRecord<T> {
    pub fn new(id: TaskId, action: Arc<dyn Action<T>>) -> Self {
        let now = Instant::now();
        Self {
            id,
            action,
            state: TaskState::Pending,
            retries: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attempt number of the current or upcoming run (1-indexed).
    pub fn attempt(&self) -> u32 {
        self.retries + 1
    }

    /// Mark as executing.
    pub fn start_attempt(&mut self) {
        self.state = TaskState::Executing;
        self.updated_at = Instant::now();
    }

    /// Consume one retry and go back to the pending state.
    pub fn requeue(&mut self) {
        self.retries += 1;
        self.state = TaskState::Pending;
        self.updated_at = Instant::now();
    }
}

impl<T> fmt::Debug for TaskRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRecord")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}

/// A finished task, stored in completion order.
#[derive(Debug, Clone)]
pub struct CompletedTask<T> {
    pub id: TaskId,

    /// Total attempts made.
    pub attempts: u32,

    /// The success value, or the terminal failure.
    pub result: Result<T, TaskFailure>,
}

impl<T> CompletedTask<T> {
    pub fn state(&self) -> TaskState {
        match self.result {
            Ok(_) => TaskState::Succeeded,
            Err(_) => TaskState::Dead,
        }
    }
}
