//! Task identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a submitted task.
///
/// Ids are assigned sequentially at submission time (count of tasks ever
/// submitted, plus one) and are stable across retries: a re-queued task keeps
/// the id it was submitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_prefix() {
        assert_eq!(TaskId::new(7).to_string(), "task-7");
    }

    #[test]
    fn ids_order_by_submission() {
        assert!(TaskId::new(1) < TaskId::new(2));
        assert_eq!(TaskId::new(3), TaskId::new(3));
    }
}
