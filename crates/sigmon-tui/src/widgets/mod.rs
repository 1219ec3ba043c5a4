//! Ratatui widgets for the sigmon TUI.

pub mod filter_bar;
pub mod header;
pub mod help;
pub mod signal_table;
