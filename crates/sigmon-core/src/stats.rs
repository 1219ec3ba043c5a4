//! Summary counters derived from the store for the monitor header.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::Store;
use crate::types::SignalStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedStats {
    /// Records currently retained.
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub pending: usize,
    /// Records dropped by the capacity limit since start.
    pub evicted: u64,
    pub by_symbol: BTreeMap<String, usize>,
}

impl FeedStats {
    pub fn from_store(store: &Store) -> Self {
        let mut stats = FeedStats {
            evicted: store.evicted(),
            ..Default::default()
        };
        for record in store.iter() {
            stats.total += 1;
            match record.status {
                SignalStatus::Sent => stats.sent += 1,
                SignalStatus::Failed => stats.failed += 1,
                SignalStatus::Pending => stats.pending += 1,
            }
            *stats.by_symbol.entry(record.symbol.clone()).or_default() += 1;
        }
        stats
    }

    pub fn count(&self, status: SignalStatus) -> usize {
        match status {
            SignalStatus::Sent => self.sent,
            SignalStatus::Failed => self.failed,
            SignalStatus::Pending => self.pending,
        }
    }

    /// Fraction of retained signals that were sent, `None` for an empty store.
    pub fn success_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.sent as f64 / self.total as f64)
    }
}
