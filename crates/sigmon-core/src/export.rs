//! Export layer — writes the filtered, sorted view (never a single page) as
//! CSV or JSON lines.
//!
//! CSV goes through the `csv` encoder, so a field containing a comma or a
//! quote is quoted rather than corrupting the row. Timestamps are rendered in
//! a caller-supplied time zone with a chrono format string; the `*_local`
//! helpers use the machine's local zone as the monitor does.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDate, TimeZone};

use crate::types::SignalRecord;
use crate::{Error, Result};

/// Fixed CSV header row.
pub const CSV_HEADER: [&str; 7] = ["Timestamp", "Symbol", "Type", "Volume", "Price", "IP", "Status"];

/// Prefix of every export filename.
pub const FILE_PREFIX: &str = "signal-logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Jsonl => "jsonl",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "json" => Ok(ExportFormat::Jsonl),
            _ => Err(Error::unknown("export format", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Encoders
// ---------------------------------------------------------------------------

/// Encode records as CSV with the fixed header, one row per record.
pub fn to_csv<'a, I, Tz>(records: I, tz: &Tz, timestamp_format: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a SignalRecord>,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let ts = record.timestamp.with_timezone(tz).format(timestamp_format).to_string();
        writer.write_record([
            ts.as_str(),
            record.symbol.as_str(),
            record.side.label(),
            record.volume.to_string().as_str(),
            record.price.to_string().as_str(),
            record.origin.as_str(),
            record.status.label(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// [`to_csv`] in the local time zone.
pub fn to_csv_local<'a, I>(records: I, timestamp_format: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a SignalRecord>,
{
    to_csv(records, &Local, timestamp_format)
}

/// Encode records as newline-delimited JSON, timestamps in RFC 3339 UTC.
pub fn to_jsonl<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a SignalRecord>,
{
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// Encode in the requested format. CSV timestamps use the local time zone.
pub fn render<'a, I>(records: I, format: ExportFormat, timestamp_format: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a SignalRecord>,
{
    match format {
        ExportFormat::Csv => to_csv_local(records, timestamp_format),
        ExportFormat::Jsonl => to_jsonl(records),
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// `signal-logs-<YYYY-MM-DD>.<ext>`.
pub fn export_filename(date: NaiveDate, format: ExportFormat) -> String {
    format!("{FILE_PREFIX}-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Write `records` to `dir/signal-logs-<date>.<ext>`, creating `dir` if
/// needed. An existing file for the same date is overwritten.
pub fn write_export<'a, I>(
    dir: &Path,
    records: I,
    format: ExportFormat,
    timestamp_format: &str,
    date: NaiveDate,
) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a SignalRecord>,
{
    let body = render(records, format, timestamp_format)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(date, format));
    std::fs::write(&path, body)?;
    tracing::info!(path = %path.display(), %format, "export written");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
