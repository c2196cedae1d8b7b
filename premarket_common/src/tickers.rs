//! Ticker universe and parsing helpers shared by the data layer and the screener.
//!
//! The universe is closed: every quote and every daily series is keyed by a
//! [`Ticker`]. Strings outside the universe resolve to
//! [`MarketError::TickerNotFound`] instead of panicking.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::MarketError;

/// Symbols the screener shows when no explicit list is given.
pub const DEFAULT_WATCHLIST: [Ticker; 4] = [Ticker::NVDA, Ticker::TSLA, Ticker::QQQ, Ticker::SPY];

/// Symbols whose charts get a widened high/low band.
pub const VOLATILE_TICKERS: [Ticker; 2] = [Ticker::AAPL, Ticker::TSLA];

/// Trait providing list parsing for tickers.
pub trait TickerParser: Sized {
    /// Parses tickers from a buffered reader.
    ///
    /// Each line may hold several symbols separated by commas or whitespace.
    /// Empty lines are skipped; duplicates keep their first position.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Self>, MarketError>;

    /// Parses a comma/whitespace separated list such as `"nvda, TSLA spy"`.
    fn parse_list(list: &str) -> Result<Vec<Self>, MarketError>;
}

impl TickerParser for Ticker {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Self>, MarketError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(MarketError::Io)?;
            for ticker in Self::parse_list(&line)? {
                if !tickers.contains(&ticker) {
                    tickers.push(ticker);
                }
            }
        }
        Ok(tickers)
    }

    fn parse_list(list: &str) -> Result<Vec<Self>, MarketError> {
        let mut tickers = Vec::new();
        for token in list
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
        {
            let ticker = Ticker::resolve(token)?;
            if !tickers.contains(&ticker) {
                tickers.push(ticker);
            }
        }
        Ok(tickers)
    }
}

/// Static per-symbol parameters used by the mock quote model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickerProfile {
    /// Baseline previous-session close.
    pub last_close: f64,
    /// Maximum relative premarket move, e.g. `0.03` for 3%.
    pub volatility: f64,
    /// Average regular-session volume in shares.
    pub avg_volume: u64,
}

/// Set of supported ticker symbols.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[value(rename_all = "UPPER")]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    NVDA,
    TSLA,
    AAPL,
    MSFT,
    AMZN,
    GOOGL,
    META,
    AMD,
    SPY,
    QQQ,
}

impl Ticker {
    /// Every member of the universe, in declaration order.
    pub fn universe() -> Vec<Ticker> {
        Ticker::iter().collect()
    }

    /// Resolve a user supplied symbol, trimming whitespace and ignoring case.
    pub fn resolve(symbol: &str) -> Result<Ticker, MarketError> {
        <Ticker as FromStr>::from_str(symbol.trim())
            .map_err(|_| MarketError::TickerNotFound(symbol.trim().to_string()))
    }

    /// Whether the symbol belongs to the widened-band chart set.
    pub fn is_volatile(&self) -> bool {
        VOLATILE_TICKERS.contains(self)
    }

    /// Mock model parameters for this symbol.
    pub fn profile(&self) -> TickerProfile {
        let (last_close, volatility, avg_volume) = match self {
            Ticker::NVDA => (125.5, 0.03, 5_000_000),
            Ticker::TSLA => (250.75, 0.04, 8_000_000),
            Ticker::AAPL => (185.2, 0.02, 6_000_000),
            Ticker::MSFT => (330.4, 0.025, 4_000_000),
            Ticker::AMZN => (135.7, 0.03, 7_000_000),
            Ticker::GOOGL => (142.3, 0.025, 3_000_000),
            Ticker::META => (310.8, 0.035, 4_500_000),
            Ticker::AMD => (110.25, 0.04, 5_500_000),
            Ticker::SPY => (450.8, 0.015, 10_000_000),
            Ticker::QQQ => (375.2, 0.02, 8_500_000),
        };
        TickerProfile {
            last_close,
            volatility,
            avg_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(Ticker::resolve(" nvda ").unwrap(), Ticker::NVDA);
        assert_eq!(Ticker::resolve("Googl").unwrap(), Ticker::GOOGL);
    }

    #[test]
    fn test_resolve_unknown_symbol() {
        let err = Ticker::resolve("XYZ").unwrap_err();
        assert!(matches!(err, MarketError::TickerNotFound(ref s) if s == "XYZ"));
    }

    #[test]
    fn test_parse_list_dedups_and_keeps_order() {
        let tickers = Ticker::parse_list("tsla, NVDA  spy,tsla").unwrap();
        assert_eq!(tickers, vec![Ticker::TSLA, Ticker::NVDA, Ticker::SPY]);
    }

    #[test]
    fn test_parse_from_reader_skips_blank_lines() {
        let input = Cursor::new("NVDA\n\n  QQQ, AMD\n");
        let tickers = Ticker::parse_from_reader(input).unwrap();
        assert_eq!(tickers, vec![Ticker::NVDA, Ticker::QQQ, Ticker::AMD]);
    }

    #[test]
    fn test_parse_from_reader_rejects_unknown() {
        let input = Cursor::new("NVDA\nFOO\n");
        assert!(Ticker::parse_from_reader(input).is_err());
    }

    #[test]
    fn test_universe_and_profiles() {
        let universe = Ticker::universe();
        assert_eq!(universe.len(), 10);
        for ticker in universe {
            let profile = ticker.profile();
            assert!(profile.last_close > 0.0);
            assert!(profile.volatility > 0.0 && profile.volatility < 0.1);
            assert!(profile.avg_volume > 0);
        }
    }

    #[test]
    fn test_volatile_set() {
        assert!(Ticker::AAPL.is_volatile());
        assert!(Ticker::TSLA.is_volatile());
        assert!(!Ticker::MSFT.is_volatile());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        assert_eq!(Ticker::QQQ.to_string(), "QQQ");
        assert_eq!("qqq".parse::<Ticker>().unwrap(), Ticker::QQQ);
        assert_eq!(<Ticker as FromStr>::from_str("Qqq").unwrap(), Ticker::QQQ);
    }
}
