//! Counter port: observability of work completed.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Group of every counter this crate increments.
pub const GROUP: &str = "WordNet";
/// Records emitted by the aggregator.
pub const HEADWORDS_PROCESSED: &str = "HeadwordsProcessed";
pub const INPUT_LINES: &str = "InputLines";
pub const BLANK_LINES: &str = "BlankLines";
pub const EDGES_EMITTED: &str = "EdgesEmitted";
pub const TASK_ATTEMPTS: &str = "TaskAttempts";
pub const FAILED_TASKS: &str = "FailedTasks";

/// A sink for named, monotonically increasing counters.
pub trait Counters: Send + Sync {
    fn increment(&self, group: &str, name: &str, by: u64);
}

/// Discards every increment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCounters;

impl Counters for NoopCounters {
    fn increment(&self, _group: &str, _name: &str, _by: u64) {}
}

/// One counter value in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterValue {
    pub group: String,
    pub name: String,
    pub value: u64,
}

/// Thread-safe in-process counters.
#[derive(Debug, Default)]
pub struct MemoryCounters {
    values: Mutex<BTreeMap<(String, String), u64>>,
}

impl MemoryCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: &str, name: &str) -> u64 {
        self.values
            .lock()
            .get(&(group.to_string(), name.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// All counters, sorted by (group, name).
    pub fn snapshot(&self) -> Vec<CounterValue> {
        self.values
            .lock()
            .iter()
            .map(|((group, name), value)| CounterValue {
                group: group.clone(),
                name: name.clone(),
                value: *value,
            })
            .collect()
    }
}

impl Counters for MemoryCounters {
    fn increment(&self, group: &str, name: &str, by: u64) {
        *self
            .values
            .lock()
            .entry((group.to_string(), name.to_string()))
            .or_insert(0) += by;
    }
}
