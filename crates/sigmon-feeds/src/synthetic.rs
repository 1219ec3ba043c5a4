//! Synthetic feed — a demo arrival model that stands in for a real signal
//! source.
//!
//! Every `interval` the feed flips a biased coin; on success it synthesizes
//! one [`NewSignal`] with a random symbol, side, volume, price, origin and
//! status stamped with the current time. The model is a Bernoulli trial per
//! tick, not a continuous-time process.
//!
//! [`SyntheticFeed::tick`] is synchronous and deterministic for a given seed,
//! so the headless runner and tests drive it directly without a timer.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sigmon_core::config::FeedConfig;
use sigmon_core::{ConnectionHealth, NewSignal, Side, SignalStatus};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{Feed, FeedError, FeedEvent};

const FALLBACK_SYMBOL: &str = "EURUSD";

pub struct SyntheticFeed {
    interval: Duration,
    probability: f64,
    symbols: Vec<String>,
    rng: StdRng,
}

impl SyntheticFeed {
    /// Build from the `[feed]` config section, seeded from the OS.
    pub fn new(config: &FeedConfig) -> Self {
        let symbols: Vec<String> = config
            .symbols
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            interval: config.interval().max(Duration::from_millis(1)),
            probability: config.arrival_probability.clamp(0.0, 1.0),
            symbols,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the RNG with a deterministic one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// One Bernoulli trial: `Some(signal)` with the configured probability.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<NewSignal> {
        if !self.rng.random_bool(self.probability) {
            return None;
        }
        Some(self.synthesize(now))
    }

    fn synthesize(&mut self, now: DateTime<Utc>) -> NewSignal {
        let symbol = if self.symbols.is_empty() {
            FALLBACK_SYMBOL.to_string()
        } else {
            self.symbols[self.rng.random_range(0..self.symbols.len())].clone()
        };
        let side = if self.rng.random_bool(0.5) { Side::Buy } else { Side::Sell };
        let volume = round_to(self.rng.random::<f64>() * 0.5 + 0.01, 2);
        let price = round_to(self.rng.random::<f64>() * 2.0 + 0.5, 4);
        let origin = format!("192.168.1.{}", self.rng.random_range(100..300));
        let status = SignalStatus::ALL[self.rng.random_range(0..SignalStatus::ALL.len())];

        NewSignal {
            timestamp: now,
            symbol,
            side,
            volume,
            price,
            origin,
            status,
        }
    }

    /// Tick on a timer until cancelled or the receiver goes away.
    ///
    /// The first signal can arrive one full interval after start, never
    /// immediately.
    pub async fn run(
        mut self,
        tx: mpsc::Sender<FeedEvent>,
        cancel: CancellationToken,
    ) -> Result<(), FeedError> {
        if tx.send(FeedEvent::Health(ConnectionHealth::Connected)).await.is_err() {
            return Ok(());
        }
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            probability = self.probability,
            "synthetic feed started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("synthetic feed cancelled");
                    let _ = tx.try_send(FeedEvent::Health(ConnectionHealth::Disconnected));
                    break;
                }
                _ = ticker.tick() => {
                    let Some(signal) = self.tick(Utc::now()) else { continue };
                    tracing::debug!(symbol = %signal.symbol, status = %signal.status, "synthetic signal");
                    if tx.send(FeedEvent::Signal(signal)).await.is_err() {
                        tracing::debug!("synthetic feed receiver dropped");
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Feed for SyntheticFeed {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn spawn(
        self,
        tx: mpsc::Sender<FeedEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<Result<(), FeedError>> {
        tokio::spawn(self.run(tx, cancel))
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
