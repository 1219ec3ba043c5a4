//! Core types for sigmon-core.
//!
//! This module defines the fundamental data structures shared across all
//! layers: the immutable [`SignalRecord`], the id-less [`NewSignal`] that feeds
//! produce, its [`Side`] and [`SignalStatus`], and the feed-level
//! [`ConnectionHealth`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// A trade signal log entry held by the store.
///
/// Records are never mutated after the store stamps their `id`; they leave the
/// store only through eviction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Store-assigned identifier, monotonic in insertion order.
    pub id: u64,
    /// When the signal was produced.
    pub timestamp: DateTime<Utc>,
    /// Instrument code, e.g. `EURUSD`.
    pub symbol: String,
    pub side: Side,
    pub volume: f64,
    pub price: f64,
    /// Network address the signal was dispatched to.
    pub origin: String,
    pub status: SignalStatus,
}

/// A signal as produced by a feed, before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSignal {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub side: Side,
    pub volume: f64,
    pub price: f64,
    pub origin: String,
    pub status: SignalStatus,
}

impl NewSignal {
    /// Stamp this signal with its store id.
    pub fn into_record(self, id: u64) -> SignalRecord {
        SignalRecord {
            id,
            timestamp: self.timestamp,
            symbol: self.symbol,
            side: self.side,
            volume: self.volume,
            price: self.price,
            origin: self.origin,
            status: self.status,
        }
    }
}

/// Trade direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(Error::unknown("side", s)),
        }
    }
}

/// Delivery status of a signal. Set once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Sent,
    Failed,
    Pending,
}

impl SignalStatus {
    pub const ALL: [SignalStatus; 3] = [SignalStatus::Sent, SignalStatus::Failed, SignalStatus::Pending];

    pub fn label(self) -> &'static str {
        match self {
            SignalStatus::Sent => "sent",
            SignalStatus::Failed => "failed",
            SignalStatus::Pending => "pending",
        }
    }
}

impl std::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SignalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sent" => Ok(SignalStatus::Sent),
            "failed" => Ok(SignalStatus::Failed),
            "pending" => Ok(SignalStatus::Pending),
            _ => Err(Error::unknown("status", s)),
        }
    }
}

/// Health of the feed connection, kept separate from per-record status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionHealth {
    #[default]
    Connected,
    Disconnected,
}

impl std::fmt::Display for ConnectionHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionHealth::Connected => write!(f, "connected"),
            ConnectionHealth::Disconnected => write!(f, "disconnected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
