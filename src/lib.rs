//! sigmon — live trade-signal log monitor.
//!
//! The workspace is split the same way the data flows:
//!
//! ```text
//! Feed (synthetic | jsonl) ──► mpsc channel ──► Monitor (store + view config)
//!                                                  │
//!                                    view() ◄──────┼──────► export()
//! ```
//!
//! - [`sigmon_core`]: records, the capped store, the pure view layer, export.
//! - [`sigmon_feeds`]: background feed tasks and the channel drain.
//! - [`sigmon_tui`]: the interactive monitor screen.
//!
//! This crate adds the [`headless`] runner used by the `sigmon` binary and the
//! integration harnesses.

pub mod headless;

pub use sigmon_core;
pub use sigmon_feeds;
pub use sigmon_tui;
