use std::path::PathBuf;

use clap::Parser;
use sigmon::headless::{self, HeadlessOptions};
use sigmon_core::config::Config;
use sigmon_core::export::ExportFormat;
use sigmon_core::{SortField, StatusFilter};
use sigmon_tui::FeedSource;

#[derive(Parser)]
#[command(name = "sigmon", about = "sigmon — live trade-signal monitor")]
struct Cli {
    /// Write debug logs to /tmp/sigmon-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file to use instead of ~/.config/sigmon/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Theme file layered over the built-in theme.
    #[arg(long, value_name = "PATH")]
    theme: Option<PathBuf>,

    /// Read signals as JSON lines from this file instead of the synthetic feed.
    #[arg(long, value_name = "PATH")]
    feed_file: Option<PathBuf>,

    /// Print a page or write an export without starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Synthetic feed trials to run before printing (headless only).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// RNG seed for reproducible synthetic ticks.
    #[arg(long)]
    seed: Option<u64>,

    /// Case-insensitive substring matched against symbol, IP and side.
    #[arg(long, default_value = "")]
    query: String,

    /// all | sent | failed | pending
    #[arg(long, default_value = "all", value_parser = parse_status)]
    status: StatusFilter,

    /// Column to sort by: timestamp, symbol, type, volume, price, ip, status.
    #[arg(long, value_parser = parse_sort_field)]
    sort: Option<SortField>,

    /// Sort ascending instead of descending.
    #[arg(long)]
    asc: bool,

    /// 1-based page to print.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page (defaults to view.page_size).
    #[arg(long)]
    page_size: Option<usize>,

    /// Write the filtered signals to this directory instead of printing.
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Export format: csv | jsonl
    #[arg(long, default_value = "csv", value_parser = parse_format)]
    format: ExportFormat,
}

fn parse_status(s: &str) -> Result<StatusFilter, sigmon_core::Error> {
    s.parse()
}

fn parse_sort_field(s: &str) -> Result<SortField, sigmon_core::Error> {
    s.parse()
}

fn parse_format(s: &str) -> Result<ExportFormat, sigmon_core::Error> {
    s.parse()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/sigmon-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sigmon debug log started — tail -f /tmp/sigmon-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };

    if cli.headless {
        let opts = HeadlessOptions {
            ticks: cli.ticks,
            seed: cli.seed,
            feed_file: cli.feed_file,
            query: cli.query,
            status: cli.status,
            sort: cli.sort,
            ascending: cli.asc,
            page: cli.page,
            page_size: cli.page_size,
            export: cli.export,
            format: cli.format,
        };
        let stdout = std::io::stdout();
        return headless::run(&config, &opts, &mut stdout.lock());
    }

    let source = match cli.feed_file {
        Some(path) => FeedSource::Jsonl(path),
        None => FeedSource::Synthetic,
    };
    sigmon_tui::run(config, source, cli.theme)
}
