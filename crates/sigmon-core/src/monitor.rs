//! Monitor — a store plus the current [`ViewConfig`] and feed health.
//!
//! This is the stateful face the UI and headless runner work against. Every
//! read goes through the pure functions in [`view`](crate::view) and
//! [`export`](crate::export); setters only swap the view configuration and
//! never touch the stored records.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::export::{self, ExportFormat};
use crate::stats::FeedStats;
use crate::store::Store;
use crate::types::{ConnectionHealth, NewSignal, SignalRecord};
use crate::view::{self, Page, SortField, SortKey, StatusFilter, ViewConfig};
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct Monitor {
    store: Store,
    config: ViewConfig,
    health: ConnectionHealth,
}

impl Monitor {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            config: ViewConfig::default(),
            health: ConnectionHealth::default(),
        }
    }

    /// A monitor over the reference seed signals.
    pub fn seeded(capacity: usize) -> Self {
        Self::new(Store::seeded(capacity))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn health(&self) -> ConnectionHealth {
        self.health
    }

    pub fn set_health(&mut self, health: ConnectionHealth) {
        if self.health != health {
            tracing::info!(%health, "feed health changed");
        }
        self.health = health;
    }

    /// Add a signal from a feed. Returns the id the store assigned.
    pub fn ingest(&mut self, signal: NewSignal) -> u64 {
        let id = self.store.push(signal);
        tracing::debug!(id, len = self.store.len(), "monitor: signal ingested");
        id
    }

    /// Replace both filters.
    pub fn set_filter(&mut self, query: impl Into<String>, status: StatusFilter) {
        self.config = std::mem::take(&mut self.config)
            .with_query(query)
            .with_status(status);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.config.query = query.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.config.status = status;
    }

    /// Header-click sort: same field flips, a new field starts descending.
    pub fn set_sort(&mut self, field: SortField) {
        self.config.sort = self.config.sort.toggled(field);
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.config.sort = key;
    }

    pub fn view(&self, page: usize, page_size: usize) -> Page<'_> {
        view::view(&self.store, &self.config, page, page_size)
    }

    /// All records passing the current filters, sorted, unpaginated.
    pub fn filtered(&self) -> Vec<&SignalRecord> {
        view::filtered(self.store.iter(), &self.config)
    }

    /// CSV of the filtered view, timestamps in local time.
    pub fn export_csv(&self, timestamp_format: &str) -> Result<String> {
        export::to_csv_local(self.filtered(), timestamp_format)
    }

    /// Write the filtered view to `dir` in `format`.
    pub fn export_to(
        &self,
        dir: &Path,
        format: ExportFormat,
        timestamp_format: &str,
        date: NaiveDate,
    ) -> Result<PathBuf> {
        export::write_export(dir, self.filtered(), format, timestamp_format, date)
    }

    pub fn stats(&self) -> FeedStats {
        FeedStats::from_store(&self.store)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
