//! Literal golden quotes for the default screener watch list.
//!
//! These values are fixed test data. The stored gaps are the rounded figures
//! the fixture was captured with, not recomputed from the prices.

use chrono::{DateTime, Utc};
use premarket_common::{Quote, QuoteMap, Result, Ticker};

use super::{QuoteProvider, QuoteRequest};

/// (symbol, last close, premarket price, premarket volume, ATR(14), gap %)
const FIXTURE: [(Ticker, f64, f64, u64, f64, f64); 4] = [
    (Ticker::NVDA, 125.5, 130.25, 1_250_000, 3.2, 3.78),
    (Ticker::TSLA, 250.75, 248.5, 850_000, 8.5, -0.9),
    (Ticker::QQQ, 375.2, 378.9, 250_000, 5.7, 0.99),
    (Ticker::SPY, 450.8, 452.3, 500_000, 7.2, 0.33),
];

/// The four fixture quotes stamped with `now`.
pub fn static_quotes(now: DateTime<Utc>) -> QuoteMap {
    FIXTURE
        .iter()
        .map(|&(symbol, last_close, premarket_price, premarket_volume, atr14, gap_percent)| {
            (
                symbol,
                Quote {
                    symbol,
                    last_close,
                    premarket_price,
                    premarket_volume,
                    atr14,
                    gap_percent,
                    updated_at: now,
                },
            )
        })
        .collect()
}

/// Provider serving [`static_quotes`], filtered to the requested symbols.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuoteProvider;

impl QuoteProvider for FixtureQuoteProvider {
    fn id(&self) -> &'static str {
        "FIXTURE"
    }

    fn fetch_quotes(&self, request: &QuoteRequest<'_>) -> Result<QuoteMap> {
        let mut quotes = static_quotes(request.now);
        quotes.retain(|ticker, _| request.symbols.contains(ticker));
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixture_values() {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
        let quotes = static_quotes(now);
        assert_eq!(quotes.len(), 4);

        let nvda = &quotes[&Ticker::NVDA];
        assert_eq!(nvda.last_close, 125.5);
        assert_eq!(nvda.premarket_price, 130.25);
        assert_eq!(nvda.premarket_volume, 1_250_000);
        assert_eq!(nvda.atr14, 3.2);
        assert_eq!(nvda.gap_percent, 3.78);
        assert_eq!(nvda.updated_at, now);

        let tsla = &quotes[&Ticker::TSLA];
        assert_eq!(tsla.gap_percent, -0.9);
    }

    #[test]
    fn test_fixture_gaps_agree_with_prices_to_two_decimals() {
        let quotes = static_quotes(Utc::now());
        for quote in quotes.values() {
            assert!(quote.is_gap_consistent(0.01), "{} gap drifted", quote.symbol);
        }
    }

    #[test]
    fn test_provider_filters_to_request() {
        let symbols = [Ticker::SPY, Ticker::AAPL];
        let request = QuoteRequest {
            symbols: &symbols,
            now: Utc::now(),
            api_key: None,
        };
        let quotes = FixtureQuoteProvider.fetch_quotes(&request).unwrap();
        assert_eq!(quotes.keys().copied().collect::<Vec<_>>(), vec![Ticker::SPY]);
    }
}
