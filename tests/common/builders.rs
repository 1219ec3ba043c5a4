//! Test builders — ergonomic constructors for `NewSignal` and `Store`.
//!
//! Built for readability in assertions, not production use. They panic on
//! invalid input rather than returning `Result`.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sigmon_core::{NewSignal, Side, SignalStatus, Store};

// ---------------------------------------------------------------------------
// SignalBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`NewSignal`] fixtures.
///
/// ```rust
/// let signal = SignalBuilder::new("EURUSD")
///     .side(Side::Sell)
///     .status(SignalStatus::Failed)
///     .origin("10.0.0.7")
///     .build();
/// ```
pub struct SignalBuilder {
    timestamp: DateTime<Utc>,
    symbol: String,
    side: Side,
    volume: f64,
    price: f64,
    origin: String,
    status: SignalStatus,
}

impl SignalBuilder {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            timestamp: base_time(),
            symbol: symbol.into(),
            side: Side::Buy,
            volume: 0.1,
            price: 1.0,
            origin: "10.0.0.1".to_string(),
            status: SignalStatus::Sent,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn status(mut self, status: SignalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> NewSignal {
        NewSignal {
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

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// 2024-01-15T15:00:00Z, after every seed record.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 15, 0, 0).unwrap()
}

/// `n` signals one second apart starting at [`base_time`], cycling symbols
/// and statuses so filters have something to bite on.
pub fn signal_series(n: usize) -> Vec<NewSignal> {
    const SYMBOLS: [&str; 4] = ["EURUSD", "GBPUSD", "USDJPY", "AUDUSD"];
    (0..n)
        .map(|i| {
            SignalBuilder::new(SYMBOLS[i % SYMBOLS.len()])
                .at(base_time() + TimeDelta::seconds(i as i64))
                .side(if i % 2 == 0 { Side::Buy } else { Side::Sell })
                .volume(0.01 * (i % 50 + 1) as f64)
                .price(1.0 + i as f64 / 1000.0)
                .origin(format!("10.0.0.{}", i % 256))
                .status(SignalStatus::ALL[i % 3])
                .build()
        })
        .collect()
}

/// A store of the given capacity filled with [`signal_series`].
pub fn store_with(capacity: usize, n: usize) -> Store {
    let mut store = Store::new(capacity);
    store.extend(signal_series(n));
    store
}
