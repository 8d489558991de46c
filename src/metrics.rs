//! Fire-and-forget counters
//!
//! The core only ever calls [`Metrics::increment`]; what happens to the
//! counts is up to the caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

/// Counter sink injected into the pipeline
pub trait Metrics: Send + Sync {
    /// Bumps the named counter by one
    fn increment(&self, name: &str);
}

/// Discards every increment
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn increment(&self, _name: &str) {}
}

/// In-memory counters, safe to share between threads
#[derive(Debug, Clone, Default)]
pub struct CounterMetrics {
    counts: Arc<DashMap<String, u64>>,
}

impl CounterMetrics {
    /// Creates an empty counter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter, 0 if never incremented
    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).map(|c| *c).unwrap_or(0)
    }

    /// Sorted copy of all counters
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

impl Metrics for CounterMetrics {
    fn increment(&self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }
}
