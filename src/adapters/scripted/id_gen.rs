//! Counting id generator for deterministic tests.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::ports::IdGenerator;

/// Generates `prefix-1`, `prefix-2`, … in order.
pub struct SequenceIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequenceIdGenerator {
    /// Creates a generator with the given id prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_from_one() {
        let ids = SequenceIdGenerator::new("task");
        assert_eq!(ids.generate_id(), "task-1");
        assert_eq!(ids.generate_id(), "task-2");
        assert_eq!(ids.generate_id(), "task-3");
    }
}
