//! Fixed reference signals loaded into the store at startup.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{NewSignal, Side, SignalStatus};

/// The five reference signals, newest first.
///
/// [`Store::seeded`](crate::Store::seeded) inserts them oldest first so that
/// store ids stay monotonic with insertion while the newest-first display
/// order is preserved.
pub fn seed_signals() -> Vec<NewSignal> {
    vec![
        signal((14, 30, 25), "EURUSD", Side::Buy, 0.1, 1.0842, "192.168.1.100", SignalStatus::Sent),
        signal((14, 28, 15), "GBPUSD", Side::Sell, 0.05, 1.2634, "192.168.1.101", SignalStatus::Sent),
        signal((14, 25, 42), "USDJPY", Side::Buy, 0.2, 148.75, "192.168.1.102", SignalStatus::Failed),
        signal((14, 22, 18), "AUDUSD", Side::Sell, 0.15, 0.7823, "192.168.1.103", SignalStatus::Sent),
        signal((14, 20, 5), "EURUSD", Side::Buy, 0.08, 1.0838, "192.168.1.104", SignalStatus::Pending),
    ]
}

fn signal(
    (h, m, s): (u32, u32, u32),
    symbol: &str,
    side: Side,
    volume: f64,
    price: f64,
    origin: &str,
    status: SignalStatus,
) -> NewSignal {
    NewSignal {
        timestamp: seed_time(h, m, s),
        symbol: symbol.to_string(),
        side,
        volume,
        price,
        origin: origin.to_string(),
        status,
    }
}

fn seed_time(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, h, m, s)
        .single()
        .expect("seed timestamps are valid UTC instants")
}
