//! sigmon TUI — ratatui signal monitor screen.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

use std::path::PathBuf;

use sigmon_core::config::Config;
use sigmon_core::Monitor;
use sigmon_feeds::{Feed, JsonlFeed, SyntheticFeed};
use tokio_util::sync::CancellationToken;

pub use app::App;

/// Where live signals come from.
#[derive(Debug, Clone, Default)]
pub enum FeedSource {
    /// The built-in Bernoulli ticker.
    #[default]
    Synthetic,
    /// Newline-delimited JSON signals read from a file.
    Jsonl(PathBuf),
}

/// Start the monitor: seed the store, spawn the feed on a background
/// runtime, and run the UI on the current thread until the user quits.
pub fn run(config: Config, source: FeedSource, theme: Option<PathBuf>) -> anyhow::Result<()> {
    let theme = match theme {
        Some(path) => theme::Theme::load_file(&path)?,
        None => theme::Theme::load_default(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let cancel = CancellationToken::new();
    let (tx, rx) = sigmon_feeds::channel();

    let handle = match source {
        FeedSource::Synthetic => {
            let _guard = runtime.enter();
            spawn(SyntheticFeed::new(&config.feed), tx, &cancel)
        }
        FeedSource::Jsonl(path) => {
            let feed = runtime.block_on(JsonlFeed::open(&path))?;
            let _guard = runtime.enter();
            spawn(feed, tx, &cancel)
        }
    };

    let monitor = Monitor::seeded(config.feed.capacity);
    let result = App::new(monitor, rx, config, theme).run();

    cancel.cancel();
    match runtime.block_on(handle) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::warn!(error = %err, "feed ended with an error"),
        Err(err) => tracing::warn!(error = %err, "feed task panicked"),
    }
    runtime.shutdown_background();
    result
}

fn spawn<F: Feed>(
    feed: F,
    tx: tokio::sync::mpsc::Sender<sigmon_feeds::FeedEvent>,
    cancel: &CancellationToken,
) -> tokio::task::JoinHandle<Result<(), sigmon_feeds::FeedError>> {
    tracing::info!(feed = feed.name(), "spawning feed");
    feed.spawn(tx, cancel.clone())
}
