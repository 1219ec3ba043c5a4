//! Headless mode: build a monitor without a terminal, then print one page as
//! a text table or write an export.
//!
//! The store is seeded, optionally loaded from a JSON-lines file, then
//! advanced by `ticks` synthetic feed trials. With a fixed `seed` the whole
//! run is reproducible apart from wall-clock timestamps.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, TimeDelta, Utc};
use sigmon_core::config::Config;
use sigmon_core::export::ExportFormat;
use sigmon_core::view::Page;
use sigmon_core::{Monitor, SortDirection, SortField, SortKey, StatusFilter};
use sigmon_feeds::SyntheticFeed;

pub const NO_MATCHES: &str = "No signals match your current search criteria.";

#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    /// Synthetic feed trials to run after seeding.
    pub ticks: u64,
    pub seed: Option<u64>,
    /// JSON-lines file ingested after the seed records.
    pub feed_file: Option<PathBuf>,
    pub query: String,
    pub status: StatusFilter,
    pub sort: Option<SortField>,
    pub ascending: bool,
    pub page: usize,
    /// Overrides `view.page_size` from the config.
    pub page_size: Option<usize>,
    /// Write an export here instead of printing a page.
    pub export: Option<PathBuf>,
    pub format: ExportFormat,
}

impl HeadlessOptions {
    fn sort_key(&self) -> SortKey {
        let direction = if self.ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        SortKey::new(self.sort.unwrap_or(SortField::Timestamp), direction)
    }
}

/// Seed, ingest, tick, and apply the requested filters and sort.
pub fn build_monitor(config: &Config, opts: &HeadlessOptions) -> anyhow::Result<Monitor> {
    let mut monitor = Monitor::seeded(config.feed.capacity);

    if let Some(path) = &opts.feed_file {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("reading feed file {}", path.display()))?;
        let mut skipped = 0usize;
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            match sigmon_feeds::jsonl::parse_line(line) {
                Ok(signal) => {
                    monitor.ingest(signal);
                }
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(error = %err, "skipping malformed signal line");
                }
            }
        }
        tracing::info!(path = %path.display(), skipped, "feed file ingested");
    }

    if opts.ticks > 0 {
        let mut feed = SyntheticFeed::new(&config.feed);
        if let Some(seed) = opts.seed {
            feed = feed.with_seed(seed);
        }
        let step_ms = config.feed.interval_ms;
        let start = step_ms
            .checked_mul(opts.ticks)
            .and_then(|ms| i64::try_from(ms).ok())
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|span| Utc::now().checked_sub_signed(span))
            .with_context(|| {
                format!("{} ticks of {step_ms} ms reach past the representable time range", opts.ticks)
            })?;
        let mut arrived = 0u64;
        for i in 1..=opts.ticks {
            // i * step_ms <= ticks * step_ms, which fit in i64 above.
            let at = start + TimeDelta::milliseconds((i * step_ms) as i64);
            if let Some(signal) = feed.tick(at) {
                monitor.ingest(signal);
                arrived += 1;
            }
        }
        tracing::info!(ticks = opts.ticks, arrived, "synthetic ticks applied");
    }

    monitor.set_filter(opts.query.clone(), opts.status);
    monitor.set_sort_key(opts.sort_key());
    Ok(monitor)
}

/// Run headless mode, writing human-readable output to `out`.
pub fn run(config: &Config, opts: &HeadlessOptions, out: &mut impl Write) -> anyhow::Result<()> {
    let monitor = build_monitor(config, opts)?;

    if let Some(dir) = &opts.export {
        let count = monitor.filtered().len();
        let path = monitor
            .export_to(dir, opts.format, &config.view.timestamp_format, Local::now().date_naive())
            .with_context(|| format!("exporting to {}", dir.display()))?;
        writeln!(out, "wrote {count} signals to {}", path.display())?;
        return Ok(());
    }

    let page_size = opts.page_size.unwrap_or(config.view.page_size);
    let page = monitor.view(opts.page, page_size);
    write_page(out, &page, &config.view.timestamp_format)?;
    Ok(())
}

/// Render a page as a fixed-width text table followed by its pagination
/// line, or the no-match message.
pub fn write_page(out: &mut impl Write, page: &Page<'_>, timestamp_format: &str) -> std::io::Result<()> {
    let Some((first, last)) = page.showing_range() else {
        return writeln!(out, "{NO_MATCHES}");
    };

    writeln!(
        out,
        "{:<24} {:<8} {:<4} {:>8} {:>10} {:<15} {}",
        "TIMESTAMP", "SYMBOL", "TYPE", "VOLUME", "PRICE", "IP ADDRESS", "STATUS"
    )?;
    for r in &page.records {
        let ts = r.timestamp.with_timezone(&Local).format(timestamp_format).to_string();
        writeln!(
            out,
            "{:<24} {:<8} {:<4} {:>8} {:>10} {:<15} {}",
            ts,
            r.symbol,
            r.side.label(),
            r.volume,
            r.price,
            r.origin,
            r.status
        )?;
    }
    writeln!(
        out,
        "Showing {first} to {last} of {} results (page {}/{})",
        page.total_matching, page.page, page.total_pages
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
