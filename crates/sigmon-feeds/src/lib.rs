//! sigmon-feeds — signal feed sources for sigmon.
//!
//! Each feed runs as a background `tokio` task and pushes [`FeedEvent`]s onto
//! a bounded channel. Feeds never touch the store: the UI loop calls
//! [`drain`] between frames and is the only writer.

pub mod jsonl;
pub mod synthetic;

use sigmon_core::{ConnectionHealth, Monitor, NewSignal};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub use jsonl::JsonlFeed;
pub use synthetic::SyntheticFeed;

/// Channel capacity used by [`channel`].
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// A message from a feed to the monitor.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Signal(NewSignal),
    Health(ConnectionHealth),
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed signal: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid signal: {0}")]
    InvalidSignal(String),
}

/// Implemented by each feed source.
pub trait Feed: Send + 'static {
    /// Short name used in log events.
    fn name(&self) -> &str;

    /// Start the feed on the current `tokio` runtime. The task ends when
    /// `cancel` fires, the source is exhausted, or the receiver is dropped.
    fn spawn(
        self,
        tx: mpsc::Sender<FeedEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<Result<(), FeedError>>;
}

/// Create a feed channel with [`DEFAULT_CHANNEL_CAPACITY`].
pub fn channel() -> (mpsc::Sender<FeedEvent>, mpsc::Receiver<FeedEvent>) {
    mpsc::channel(DEFAULT_CHANNEL_CAPACITY)
}

/// Apply every pending event to `monitor` without blocking.
///
/// Returns the number of signals ingested. Once every sender is gone the
/// monitor is marked disconnected.
pub fn drain(rx: &mut mpsc::Receiver<FeedEvent>, monitor: &mut Monitor) -> usize {
    let mut ingested = 0;
    loop {
        match rx.try_recv() {
            Ok(FeedEvent::Signal(signal)) => {
                monitor.ingest(signal);
                ingested += 1;
            }
            Ok(FeedEvent::Health(health)) => monitor.set_health(health),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                monitor.set_health(ConnectionHealth::Disconnected);
                break;
            }
        }
    }
    ingested
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sigmon_core::{Side, SignalStatus};

    fn signal(symbol: &str) -> NewSignal {
        NewSignal {
            timestamp: Utc::now(),
            symbol: symbol.to_string(),
            side: Side::Sell,
            volume: 0.3,
            price: 1.1,
            origin: "10.1.1.1".to_string(),
            status: SignalStatus::Pending,
        }
    }

    #[tokio::test]
    async fn drain_applies_signals_and_health() {
        let (tx, mut rx) = channel();
        let mut monitor = Monitor::seeded(20);

        tx.send(FeedEvent::Signal(signal("USDCAD"))).await.unwrap();
        tx.send(FeedEvent::Health(ConnectionHealth::Disconnected)).await.unwrap();
        tx.send(FeedEvent::Signal(signal("NZDUSD"))).await.unwrap();

        assert_eq!(drain(&mut rx, &mut monitor), 2);
        assert_eq!(monitor.store().len(), 7);
        assert_eq!(monitor.store().latest().unwrap().symbol, "NZDUSD");
        assert_eq!(monitor.health(), ConnectionHealth::Disconnected);

        // Nothing pending: no-op, sender still alive.
        monitor.set_health(ConnectionHealth::Connected);
        assert_eq!(drain(&mut rx, &mut monitor), 0);
        assert_eq!(monitor.health(), ConnectionHealth::Connected);
    }

    #[tokio::test]
    async fn dropped_senders_mark_disconnected() {
        let (tx, mut rx) = channel();
        let mut monitor = Monitor::seeded(20);
        drop(tx);
        assert_eq!(drain(&mut rx, &mut monitor), 0);
        assert_eq!(monitor.health(), ConnectionHealth::Disconnected);
    }
}
