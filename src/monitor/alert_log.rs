use std::collections::VecDeque;

use super::types::AlertLogEntry;

/// Default number of entries kept in the alert history.
pub const DEFAULT_LOG_CAPACITY: usize = 10;

/// Bounded alert history, newest entry first.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: VecDeque<AlertLogEntry>,
    capacity: usize,
}

impl AlertLog {
    /// Create an empty log holding between one and
    /// [`DEFAULT_LOG_CAPACITY`] entries; other capacities are clamped.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, DEFAULT_LOG_CAPACITY);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepend an entry, returning the evicted oldest entry when full.
    pub fn push(&mut self, entry: AlertLogEntry) -> Option<AlertLogEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Most recent entry.
    pub fn head(&self) -> Option<&AlertLogEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlertLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<AlertLogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn anomaly_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status.is_anomaly())
            .count()
    }

    /// Mean confidence across the retained entries.
    pub fn mean_confidence(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: f64 = self.entries.iter().map(|entry| entry.confidence).sum();
        Some(total / self.entries.len() as f64)
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
