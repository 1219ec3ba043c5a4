//! sigmon-core — live signal-log monitor core library.
//!
//! This crate exposes the store, view and export layers as public modules,
//! plus the shared types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! Feed ──► channel ──► Monitor (Store + ViewConfig) ──► view()
//!                           │
//!                           └──► export()
//! ```
//!
//! Feeds never touch the store directly. The UI loop drains the feed channel
//! and is the single writer; [`view::view`] is a pure function over the store.

pub mod config;
pub mod error;
pub mod export;
pub mod monitor;
pub mod seed;
pub mod stats;
pub mod store;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use monitor::Monitor;
pub use store::Store;
pub use types::{ConnectionHealth, NewSignal, Side, SignalRecord, SignalStatus};
pub use view::{Page, SortDirection, SortField, SortKey, StatusFilter, ViewConfig};
