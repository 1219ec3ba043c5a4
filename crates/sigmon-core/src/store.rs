//! Store — bounded, newest-first buffer of [`SignalRecord`] values.
//!
//! The store is the single source of truth; views read from it, never from a
//! feed directly. New signals are prepended and the oldest record is evicted
//! once the configured capacity is exceeded.

use std::collections::VecDeque;

use crate::seed::seed_signals;
use crate::types::{NewSignal, SignalRecord};

/// Number of records retained when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct Store {
    /// Front = newest.
    records: VecDeque<SignalRecord>,
    capacity: usize,
    next_id: u64,
    evicted: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Store {
    /// Create an empty store. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_id: 1,
            evicted: 0,
        }
    }

    /// Create a store pre-loaded with the reference seed signals.
    pub fn seeded(capacity: usize) -> Self {
        let mut store = Self::new(capacity);
        store.extend(seed_signals().into_iter().rev());
        store
    }

    /// Stamp `signal` with the next id, prepend it, and evict the oldest
    /// records beyond capacity. Returns the assigned id.
    pub fn push(&mut self, signal: NewSignal) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push_front(signal.into_record(id));

        while self.records.len() > self.capacity {
            if let Some(old) = self.records.pop_back() {
                self.evicted += 1;
                tracing::debug!(id = old.id, symbol = %old.symbol, "store: evicted oldest record");
            }
        }
        id
    }

    /// Push every signal in order; the last one ends up newest.
    pub fn extend<I: IntoIterator<Item = NewSignal>>(&mut self, signals: I) {
        for signal in signals {
            self.push(signal);
        }
    }

    /// Records from newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SignalRecord> + ExactSizeIterator {
        self.records.iter()
    }

    pub fn get(&self, id: u64) -> Option<&SignalRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn latest(&self) -> Option<&SignalRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of records evicted since the store was created.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
