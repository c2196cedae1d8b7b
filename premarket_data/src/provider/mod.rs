//! Quote providers and the ordered fallback chain.
//!
//! - `chain` — `ProviderChain`: primary, secondary, then the mock generator.
//! - `mock` — `MockQuoteProvider`, always available.
//! - `fixture` — literal golden quotes for tests and demos.

pub mod chain;
pub mod fixture;
pub mod mock;

use chrono::{DateTime, Utc};
use premarket_common::{QuoteMap, Result, Ticker};

pub use chain::{ChainQuotes, ProviderChain};
pub use fixture::FixtureQuoteProvider;
pub use mock::MockQuoteProvider;

/// Parameters of a single quote fetch.
#[derive(Debug, Clone, Copy)]
pub struct QuoteRequest<'a> {
    /// Symbols to quote.
    pub symbols: &'a [Ticker],
    /// Timestamp stamped onto every returned quote.
    pub now: DateTime<Utc>,
    /// Credential for providers that need one.
    pub api_key: Option<&'a str>,
}

/// A source of premarket quote snapshots.
///
/// Implementations return at most one quote per requested symbol. The chain
/// drops anything that was not requested.
pub trait QuoteProvider: Send + Sync {
    /// Constant identifier such as `"MOCK"`, used in logs and snapshots.
    fn id(&self) -> &'static str;

    /// Fetch one snapshot for `request.symbols`.
    fn fetch_quotes(&self, request: &QuoteRequest<'_>) -> Result<QuoteMap>;
}
