//! Lifecycle events and the injectable observer sink.
//!
//! The observer is purely observational: it receives notifications about
//! scheduling decisions but has no effect on them. Events are delivered
//! synchronously while the scheduler holds its state lock, so implementations
//! must be cheap and non-blocking.

use crate::ids::TaskId;

/// A lifecycle notification emitted by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// A task was accepted into the pending list.
    TaskSubmitted { id: TaskId },

    /// A task was admitted into execution. `attempt` is 1-indexed.
    TaskStarted { id: TaskId, attempt: u32 },

    /// A task settled successfully.
    TaskSucceeded { id: TaskId },

    /// A task failed and was re-queued. `attempt` is the upcoming attempt
    /// number.
    TaskRetried { id: TaskId, attempt: u32 },

    /// A task failed with its retry budget exhausted.
    TaskFailed { id: TaskId, attempts: u32 },

    /// Admission stopped; in-flight tasks keep running.
    Paused,

    /// Admission resumed.
    Resumed,

    /// Every task of one submitted batch has finished.
    BatchCompleted { tasks: usize },
}

/// Injectable sink for lifecycle notifications.
pub trait Observer: Send + Sync {
    fn observe(&self, event: &SchedulerEvent);
}

/// Observer that drops every event. The default.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&self, _event: &SchedulerEvent) {}
}

/// Observer that forwards every event to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct TraceObserver;

impl Observer for TraceObserver {
    fn observe(&self, event: &SchedulerEvent) {
        match event {
            SchedulerEvent::TaskSubmitted { id } => tracing::debug!(%id, "task submitted"),
            SchedulerEvent::TaskStarted { id, attempt } => {
                tracing::debug!(%id, attempt, "task started")
            }
            SchedulerEvent::TaskSucceeded { id } => tracing::debug!(%id, "task succeeded"),
            SchedulerEvent::TaskRetried { id, attempt } => {
                tracing::debug!(%id, attempt, "task re-queued for retry")
            }
            SchedulerEvent::TaskFailed { id, attempts } => {
                tracing::debug!(%id, attempts, "task failed permanently")
            }
            SchedulerEvent::Paused => tracing::debug!("scheduler paused"),
            SchedulerEvent::Resumed => tracing::debug!("scheduler resumed"),
            SchedulerEvent::BatchCompleted { tasks } => {
                tracing::debug!(tasks, "all tasks in batch are done")
            }
        }
    }
}
