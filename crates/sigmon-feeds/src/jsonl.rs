//! JSON-lines feed — reads one [`NewSignal`] object per line from any async
//! reader (a file, stdin, a socket).
//!
//! Blank lines are ignored. Malformed or invalid lines are logged and
//! skipped; they never stop the feed. End of input or a read error reports
//! [`ConnectionHealth::Disconnected`] and ends the task. There is no
//! reconnect: a source that can drop and come back needs its own retry loop
//! around a fresh `JsonlFeed`.

use std::path::Path;

use sigmon_core::{ConnectionHealth, NewSignal};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{Feed, FeedError, FeedEvent};

pub struct JsonlFeed<R> {
    name: String,
    reader: R,
}

impl<R> JsonlFeed<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    /// Forward every valid line until EOF, cancellation, or the receiver
    /// goes away.
    pub async fn run(
        self,
        tx: mpsc::Sender<FeedEvent>,
        cancel: CancellationToken,
    ) -> Result<(), FeedError> {
        let name = self.name;
        let mut lines = self.reader.lines();
        let mut forwarded = 0usize;
        let mut skipped = 0usize;

        if tx.send(FeedEvent::Health(ConnectionHealth::Connected)).await.is_err() {
            return Ok(());
        }
        tracing::info!(feed = %name, "jsonl feed started");

        let result = loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(feed = %name, "jsonl feed cancelled");
                    break Ok(());
                }
                line = lines.next_line() => line,
            };

            match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match parse_line(&line) {
                    Ok(signal) => {
                        if tx.send(FeedEvent::Signal(signal)).await.is_err() {
                            tracing::debug!(feed = %name, "jsonl feed receiver dropped");
                            break Ok(());
                        }
                        forwarded += 1;
                    }
                    Err(err) => {
                        skipped += 1;
                        tracing::warn!(feed = %name, error = %err, "skipping malformed signal line");
                    }
                },
                Ok(None) => {
                    tracing::info!(feed = %name, forwarded, skipped, "jsonl feed reached end of input");
                    break Ok(());
                }
                Err(err) => {
                    tracing::warn!(feed = %name, error = %err, "jsonl feed read failed");
                    break Err(FeedError::from(err));
                }
            }
        };

        let _ = tx.try_send(FeedEvent::Health(ConnectionHealth::Disconnected));
        result
    }
}

impl JsonlFeed<BufReader<tokio::fs::File>> {
    /// Open a file of newline-delimited signals.
    pub async fn open(path: &Path) -> Result<Self, FeedError> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::new(path.display().to_string(), BufReader::new(file)))
    }
}

impl JsonlFeed<BufReader<tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new("stdin", BufReader::new(tokio::io::stdin()))
    }
}

impl<R> Feed for JsonlFeed<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(
        self,
        tx: mpsc::Sender<FeedEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<Result<(), FeedError>> {
        tokio::spawn(self.run(tx, cancel))
    }
}

/// Parse and validate one line. Volume and price must be positive and
/// finite; symbol and origin must be non-empty.
pub fn parse_line(line: &str) -> Result<NewSignal, FeedError> {
    let signal: NewSignal = serde_json::from_str(line.trim())?;
    if !(signal.volume.is_finite() && signal.volume > 0.0) {
        return Err(FeedError::InvalidSignal(format!("volume must be positive, got {}", signal.volume)));
    }
    if !(signal.price.is_finite() && signal.price > 0.0) {
        return Err(FeedError::InvalidSignal(format!("price must be positive, got {}", signal.price)));
    }
    if signal.symbol.trim().is_empty() {
        return Err(FeedError::InvalidSignal("symbol is empty".into()));
    }
    if signal.origin.trim().is_empty() {
        return Err(FeedError::InvalidSignal("origin is empty".into()));
    }
    Ok(signal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
