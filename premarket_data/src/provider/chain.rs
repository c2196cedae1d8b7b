//! Ordered provider chain with first-success-wins fallback.
//!
//! Routing, for each fetch:
//! 1. In [`DataMode::Mock`] the live slots are never consulted.
//! 2. Otherwise each live slot is tried in order. A slot without a credential
//!    is skipped. A failing slot is logged and the chain moves on; there is
//!    no retry.
//! 3. The fallback provider (the mock generator) runs last and is the only
//!    failure the caller ever sees.
//!
//! Every provider's output passes through the same normalization: symbols
//! that were not requested are dropped and gaps that disagree with the
//! quote's own prices are replaced by the derived value. An answer that lacks
//! any requested symbol counts as a failure, so a fetch yields one quote per
//! symbol or moves on to the next provider.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use premarket_common::quote::GAP_TOLERANCE;
use premarket_common::{MarketError, QuoteMap, Result, Ticker};

use super::{MockQuoteProvider, QuoteProvider, QuoteRequest};
use crate::clock::{Clock, SystemClock};
use crate::config::{DataMode, MarketConfig};

/// A live provider together with the credential that gates it.
struct LiveSlot {
    provider: Box<dyn QuoteProvider>,
    credential: Option<String>,
}

/// Quotes from one chain fetch and the provider that served them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainQuotes {
    /// One quote per requested symbol the provider knew.
    pub quotes: QuoteMap,
    /// `id()` of the provider that answered.
    pub source: &'static str,
}

/// Provider chain: live slots in order, then the fallback.
pub struct ProviderChain {
    mode: DataMode,
    live: Vec<LiveSlot>,
    fallback: Box<dyn QuoteProvider>,
    clock: Arc<dyn Clock>,
}

impl ProviderChain {
    /// Chain in mock mode with no live slots.
    pub fn new(fallback: Box<dyn QuoteProvider>, clock: Arc<dyn Clock>) -> Self {
        ProviderChain {
            mode: DataMode::Mock,
            live: Vec::new(),
            fallback,
            clock,
        }
    }

    /// Chain with the mock generator as fallback, seeded and routed per `config`.
    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(
            Box::new(MockQuoteProvider::with_seed(config.seed)),
            Arc::new(SystemClock),
        )
        .with_mode(config.mode)
    }

    /// Set the routing mode.
    pub fn with_mode(mut self, mode: DataMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Append a live slot. `None` credentials make the slot unavailable.
    pub fn with_live_provider(
        mut self,
        provider: Box<dyn QuoteProvider>,
        credential: Option<String>,
    ) -> Self {
        self.live.push(LiveSlot {
            provider,
            credential,
        });
        self
    }

    /// Append the primary slot, gated by `config.primary_api_key`.
    pub fn with_primary(self, provider: Box<dyn QuoteProvider>, config: &MarketConfig) -> Self {
        self.with_live_provider(provider, config.primary_api_key.clone())
    }

    /// Append the secondary slot, gated by `config.secondary_api_key`.
    pub fn with_secondary(self, provider: Box<dyn QuoteProvider>, config: &MarketConfig) -> Self {
        self.with_live_provider(provider, config.secondary_api_key.clone())
    }

    /// Routing mode in effect.
    pub fn mode(&self) -> DataMode {
        self.mode
    }

    /// Current time according to the chain's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Ids of the live providers that would be attempted, in order.
    pub fn available_providers(&self) -> Vec<&'static str> {
        if self.mode == DataMode::Mock {
            return Vec::new();
        }
        self.live
            .iter()
            .filter(|slot| slot.credential.is_some())
            .map(|slot| slot.provider.id())
            .collect()
    }

    /// One quote per known symbol, replacing any previous snapshot.
    pub fn get_quotes(&self, symbols: &[Ticker]) -> Result<QuoteMap> {
        self.fetch(symbols).map(|result| result.quotes)
    }

    /// Like [`Self::get_quotes`], also reporting which provider answered.
    pub fn fetch(&self, symbols: &[Ticker]) -> Result<ChainQuotes> {
        let now = self.clock.now();

        if self.mode == DataMode::Live {
            for slot in &self.live {
                let provider_id = slot.provider.id();
                let Some(api_key) = slot.credential.as_deref() else {
                    debug!("Provider '{}' has no credential, skipping", provider_id);
                    continue;
                };

                let request = QuoteRequest {
                    symbols,
                    now,
                    api_key: Some(api_key),
                };
                match self.try_provider(slot.provider.as_ref(), &request) {
                    Ok(quotes) => {
                        debug!("Fetched {} quotes from '{}'", quotes.len(), provider_id);
                        return Ok(ChainQuotes {
                            quotes,
                            source: provider_id,
                        });
                    }
                    Err(e) => warn!("Provider '{}' failed: {}, trying next", provider_id, e),
                }
            }
            info!("No live provider answered, falling back to '{}'", self.fallback.id());
        }

        let request = QuoteRequest {
            symbols,
            now,
            api_key: None,
        };
        let quotes = self.try_provider(self.fallback.as_ref(), &request)?;
        Ok(ChainQuotes {
            quotes,
            source: self.fallback.id(),
        })
    }

    fn try_provider(
        &self,
        provider: &dyn QuoteProvider,
        request: &QuoteRequest<'_>,
    ) -> Result<QuoteMap> {
        let raw = provider.fetch_quotes(request)?;
        let quotes = normalize(provider.id(), request.symbols, raw);

        let missing: Vec<String> = request
            .symbols
            .iter()
            .filter(|ticker| !quotes.contains_key(*ticker))
            .map(|ticker| ticker.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(MarketError::provider(
                provider.id(),
                format!("no quotes for {}", missing.join(",")),
            ));
        }
        Ok(quotes)
    }
}

/// Drop unrequested symbols and re-derive inconsistent gaps.
fn normalize(provider_id: &str, symbols: &[Ticker], quotes: QuoteMap) -> QuoteMap {
    quotes
        .into_iter()
        .filter(|(ticker, _)| symbols.contains(ticker))
        .map(|(ticker, mut quote)| {
            quote.symbol = ticker;
            if !quote.is_gap_consistent(GAP_TOLERANCE) {
                let derived = quote.computed_gap_percent();
                warn!(
                    "Provider '{}' reported gap {:.2}% for {} but prices imply {:.2}%, using derived value",
                    provider_id, quote.gap_percent, ticker, derived
                );
                quote.gap_percent = derived;
            }
            (ticker, quote)
        })
        .collect()
}
