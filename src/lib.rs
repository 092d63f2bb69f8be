//! `btc-forecast-dash` library crate.
//!
//! The binary (`dash`) is a thin wrapper around this library so that:
//!
//! - loading, filtering and view building are testable without a terminal
//! - every front-end (TUI, text report, HTML page, CSV export) shares one pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod debug;
pub mod domain;
pub mod error;
pub mod filter;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
