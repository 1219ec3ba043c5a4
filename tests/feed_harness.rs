//! Feed layer integration harness: feeds → channel → drain → monitor.
//!
//! # What this covers
//!
//! - **Synthetic feed** under paused `tokio` time: nothing arrives before the
//!   first interval, signals arrive one per tick at probability 1, none at
//!   probability 0, and cancellation stops the task.
//! - **JSON-lines feed**: valid lines are ingested in file order, malformed
//!   lines are skipped without stopping the feed, EOF marks the monitor
//!   disconnected.
//! - **Drain**: the cap holds while a feed outpaces the store.
//!
//! # Running
//!
//! ```sh
//! cargo test --test feed_harness
//! ```

mod common;
use common::*;

use std::io::Cursor;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sigmon_core::config::FeedConfig;
use sigmon_core::{ConnectionHealth, Monitor};
use sigmon_feeds::{drain, Feed, FeedEvent, JsonlFeed, SyntheticFeed};
use tokio_util::sync::CancellationToken;

fn feed_config(probability: f64, capacity: usize) -> FeedConfig {
    FeedConfig {
        interval_ms: 1_000,
        arrival_probability: probability,
        capacity,
        ..FeedConfig::default()
    }
}

/// Let spawned tasks run without advancing the clock.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

// ---------------------------------------------------------------------------
// Synthetic
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn synthetic_feed_waits_one_interval_before_first_signal() {
    let cfg = feed_config(1.0, 20);
    let (tx, mut rx) = sigmon_feeds::channel();
    let cancel = CancellationToken::new();
    let handle = SyntheticFeed::new(&cfg).with_seed(11).spawn(tx, cancel.clone());
    let mut monitor = Monitor::seeded(cfg.capacity);

    settle().await;
    assert_eq!(drain(&mut rx, &mut monitor), 0);
    assert_eq!(monitor.health(), ConnectionHealth::Connected);

    tokio::time::advance(Duration::from_millis(1_000)).await;
    settle().await;
    assert_eq!(drain(&mut rx, &mut monitor), 1);
    assert_eq!(monitor.store().len(), 6);

    cancel.cancel();
    handle.await.unwrap().unwrap();
    drain(&mut rx, &mut monitor);
    assert_eq!(monitor.health(), ConnectionHealth::Disconnected);
}

#[tokio::test(start_paused = true)]
async fn synthetic_feed_respects_store_cap() {
    let cfg = feed_config(1.0, 20);
    let (tx, mut rx) = sigmon_feeds::channel();
    let cancel = CancellationToken::new();
    let handle = SyntheticFeed::new(&cfg).with_seed(12).spawn(tx, cancel.clone());
    let mut monitor = Monitor::seeded(cfg.capacity);

    settle().await;
    let mut ingested = 0;
    for _ in 0..40 {
        tokio::time::advance(Duration::from_millis(1_000)).await;
        settle().await;
        ingested += drain(&mut rx, &mut monitor);
        assert!(monitor.store().len() <= cfg.capacity);
    }

    assert_eq!(ingested, 40);
    assert_eq!(monitor.store().len(), 20);
    assert_eq!(monitor.store().evicted(), 25);
    cancel.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn synthetic_feed_at_probability_zero_stays_quiet() {
    let cfg = feed_config(0.0, 20);
    let (tx, mut rx) = sigmon_feeds::channel();
    let cancel = CancellationToken::new();
    let handle = SyntheticFeed::new(&cfg).with_seed(13).spawn(tx, cancel.clone());
    let mut monitor = Monitor::seeded(cfg.capacity);

    settle().await;
    for _ in 0..20 {
        tokio::time::advance(Duration::from_millis(1_000)).await;
        settle().await;
        assert_eq!(drain(&mut rx, &mut monitor), 0);
    }
    assert_eq!(monitor.store().len(), 5);
    cancel.cancel();
    handle.await.unwrap().unwrap();
}

// ---------------------------------------------------------------------------
// JSON lines
// ---------------------------------------------------------------------------

#[tokio::test]
async fn jsonl_feed_ingests_valid_lines_and_skips_the_rest() {
    let (tx, mut rx) = sigmon_feeds::channel();
    let feed = JsonlFeed::new("mixed", Cursor::new(jsonl_mixed().into_bytes()));
    feed.spawn(tx, CancellationToken::new()).await.unwrap().unwrap();

    let mut monitor = Monitor::seeded(20);
    assert_eq!(drain(&mut rx, &mut monitor), JSONL_VALID.len());

    let newest: Vec<&str> = monitor
        .store()
        .iter()
        .take(3)
        .map(|r| r.symbol.as_str())
        .collect();
    assert_eq!(newest, ["EURGBP", "USDCAD", "NZDUSD"]);
    assert_eq!(monitor.store().latest().unwrap().id, 8);
    assert_eq!(monitor.health(), ConnectionHealth::Disconnected);
}

#[tokio::test]
async fn jsonl_feed_reads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signals.jsonl");
    std::fs::write(&path, JSONL_VALID.join("\n")).unwrap();

    let feed = JsonlFeed::open(&path).await.unwrap();
    assert_eq!(feed.name(), path.display().to_string());

    let (tx, mut rx) = sigmon_feeds::channel();
    feed.spawn(tx, CancellationToken::new()).await.unwrap().unwrap();

    let mut events = Vec::new();
    while let Some(ev) = rx.recv().await {
        events.push(ev);
    }
    assert_eq!(events.first(), Some(&FeedEvent::Health(ConnectionHealth::Connected)));
    assert_eq!(events.last(), Some(&FeedEvent::Health(ConnectionHealth::Disconnected)));
    let signals = events
        .iter()
        .filter(|ev| matches!(ev, FeedEvent::Signal(_)))
        .count();
    assert_eq!(signals, 3);
}

#[tokio::test]
async fn missing_feed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(JsonlFeed::open(&dir.path().join("absent.jsonl")).await.is_err());
}
