//! Scheduler module: admission control, retry handling, and batch awaiting.

mod core;
mod record;
mod state;

pub use self::core::{Batch, Scheduler};
pub use record::{CompletedTask, TaskRecord};
pub use state::TaskState;
