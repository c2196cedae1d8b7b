//!
//! Common types and utilities shared by the premarket data layer and the screener.
//!
//! This crate aggregates:
//! - `error` — unified error type `MarketError` used across the workspace.
//! - `result` — handy `Result<T, MarketError>` alias.
//! - `tickers` — the closed ticker universe and parsing helpers.
//! - `quote` — premarket `Quote` snapshots and gap arithmetic.
//! - `bar` — daily OHLC bars.
//! - `format` — number/volume formatting for tables.
//! - `records` — persisted row shapes of the surrounding application.
//! - `constants` — polling and history defaults, environment variable names.
#![warn(missing_docs)]
pub mod bar;
pub mod constants;
pub mod error;
pub mod format;
pub mod quote;
pub mod records;
pub mod result;
pub mod tickers;

pub use bar::DailyBar;
pub use error::MarketError;
pub use quote::{Quote, QuoteMap};
pub use result::Result;
pub use tickers::Ticker;
