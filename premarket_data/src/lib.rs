//! Premarket market-data core.
//!
//! Produces the data a premarket screener displays, without any real market
//! feed:
//! - `provider` — `QuoteProvider` strategies and the `ProviderChain` that
//!   routes primary → secondary → mock.
//! - `history` — `HistoricalSeriesGenerator`, a seeded random-walk OHLC model.
//! - `poller` — `QuotePoller`, the fixed-interval refresh loop consumers
//!   subscribe to.
//! - `config` — `MarketConfig`, injected instead of global switches.
//! - `clock` — injectable time source.
#![warn(missing_docs)]
pub mod clock;
pub mod config;
pub mod history;
pub mod poller;
pub mod provider;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DataMode, MarketConfig};
pub use history::HistoricalSeriesGenerator;
pub use poller::{MIN_POLL_INTERVAL, PollEvent, PollerHandle, QuotePoller, QuoteSnapshot};
pub use provider::{ProviderChain, QuoteProvider, QuoteRequest};
