//! Error type shared by the sigmon-core layers.
//!
//! Filtering, sorting and paging are total and never produce an error. Only
//! configuration loading, value parsing and export I/O can fail.

/// Errors produced by sigmon-core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is outside its accepted range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A textual value (status, side, sort field, export format) was not
    /// recognised.
    #[error("unknown {kind} {value:?}")]
    UnknownValue { kind: &'static str, value: String },

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Error::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
