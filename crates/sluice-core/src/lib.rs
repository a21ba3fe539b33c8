//! sluice-core
//!
//! A concurrency-limited async task scheduler.
//!
//! Callers submit batches of zero-argument async actions; the scheduler runs
//! at most `concurrency` of them at once, retries failures up to a configured
//! budget, and hands each batch back its results in completion order. The
//! whole thing can be paused and resumed externally without losing work.
//!
//! # Modules
//! - **action**: the `Action` trait (unit of submitted work)
//! - **config**: construction-time configuration
//! - **error**: caller errors and terminal task failures
//! - **events**: lifecycle events + the injectable `Observer` sink
//! - **ids**: stable task identifiers
//! - **observability**: counts and stats views
//! - **scheduler**: admission control, retry handling, batch awaiting

pub mod action;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod observability;
pub mod scheduler;

pub use action::Action;
pub use config::SchedulerConfig;
pub use error::{SchedulerError, TaskFailure};
pub use events::{NoopObserver, Observer, SchedulerEvent, TraceObserver};
pub use ids::TaskId;
pub use observability::{SchedulerCounts, SchedulerStats};
pub use scheduler::{Batch, Scheduler, TaskState};
