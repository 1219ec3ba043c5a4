//! Configuration types for sigmon.
//!
//! [`Config::load`] reads `~/.config/sigmon/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[feed]
interval_ms         = 5000
arrival_probability = 0.3
capacity            = 20
symbols             = ["EURUSD", "GBPUSD", "USDJPY", "AUDUSD", "USDCAD"]

[view]
page_size        = 10
timestamp_format = "%-m/%-d/%Y, %-I:%M:%S %p"

[export]
directory = "."
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/sigmon/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub view: ViewSettings,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[feed]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Milliseconds between synthetic feed ticks.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Chance that a tick produces a signal.
    #[serde(default = "default_arrival_probability")]
    pub arrival_probability: f64,
    /// Maximum number of records the store retains.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
}

fn default_interval_ms() -> u64 { 5_000 }
fn default_arrival_probability() -> f64 { 0.3 }
fn default_capacity() -> usize { 20 }
fn default_symbols() -> Vec<String> {
    ["EURUSD", "GBPUSD", "USDJPY", "AUDUSD", "USDCAD"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl FeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            arrival_probability: default_arrival_probability(),
            capacity: default_capacity(),
            symbols: default_symbols(),
        }
    }
}

/// `[view]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// chrono format string for displayed and CSV-exported timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_page_size() -> usize { 10 }
fn default_timestamp_format() -> String { "%-m/%-d/%Y, %-I:%M:%S %p".to_string() }

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory export files are written to.
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,
}

fn default_export_directory() -> PathBuf { PathBuf::from(".") }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sigmon/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::from_path(&path)
    }

    /// Load an explicit config file layered on top of the built-in defaults.
    /// A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values the feed or view layers cannot operate with.
    pub fn validate(&self) -> Result<()> {
        let feed = &self.feed;
        if !(0.0..=1.0).contains(&feed.arrival_probability) {
            return Err(Error::InvalidConfig(format!(
                "feed.arrival_probability must be within 0..=1, got {}",
                feed.arrival_probability
            )));
        }
        if feed.capacity == 0 {
            return Err(Error::InvalidConfig("feed.capacity must be at least 1".into()));
        }
        if feed.interval_ms == 0 {
            return Err(Error::InvalidConfig("feed.interval_ms must be at least 1".into()));
        }
        if feed.symbols.iter().all(|s| s.trim().is_empty()) {
            return Err(Error::InvalidConfig("feed.symbols must not be empty".into()));
        }
        if self.view.page_size == 0 {
            return Err(Error::InvalidConfig("view.page_size must be at least 1".into()));
        }
        let fmt = &self.view.timestamp_format;
        if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidConfig(format!(
                "view.timestamp_format {fmt:?} is not a valid strftime format"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sigmon")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
