//! Premarket quote snapshot model.
//!
//! A `Quote` is one symbol's premarket state at the moment of a fetch: the
//! previous close, the current premarket price and volume, a 14-period ATR and
//! the gap between close and premarket price. Quotes are grouped per fetch
//! cycle in a [`QuoteMap`], which consumers replace wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tickers::Ticker;

/// One quote per symbol for a single fetch cycle.
pub type QuoteMap = BTreeMap<Ticker, Quote>;

/// Tolerance, in percentage points, for comparing a stored gap with the derived one.
pub const GAP_TOLERANCE: f64 = 0.01;

/// Percentage change from `last_close` to `premarket_price`.
///
/// Defined as `0.0` when `last_close` is zero.
pub fn gap_percent(last_close: f64, premarket_price: f64) -> f64 {
    if last_close == 0.0 {
        return 0.0;
    }
    (premarket_price - last_close) / last_close * 100.0
}

/// Premarket quote for a single ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Symbol this quote belongs to.
    pub symbol: Ticker,
    /// Previous regular-session close.
    pub last_close: f64,
    /// Latest premarket trade price.
    pub premarket_price: f64,
    /// Shares traded in the premarket session so far.
    pub premarket_volume: u64,
    /// Average true range over 14 periods.
    pub atr14: f64,
    /// Signed gap in percent, see [`gap_percent`].
    pub gap_percent: f64,
    /// Snapshot time, serialized as ISO-8601.
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// Build a quote whose gap is derived from its prices.
    pub fn new(
        symbol: Ticker,
        last_close: f64,
        premarket_price: f64,
        premarket_volume: u64,
        atr14: f64,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Quote {
            symbol,
            last_close,
            premarket_price,
            premarket_volume,
            atr14,
            gap_percent: gap_percent(last_close, premarket_price),
            updated_at,
        }
    }

    /// Gap recomputed from `last_close` and `premarket_price`.
    pub fn computed_gap_percent(&self) -> f64 {
        gap_percent(self.last_close, self.premarket_price)
    }

    /// Whether the stored `gap_percent` agrees with the prices within `tolerance`.
    pub fn is_gap_consistent(&self, tolerance: f64) -> bool {
        (self.gap_percent - self.computed_gap_percent()).abs() <= tolerance
    }

    /// Signed premarket move in price units.
    pub fn price_change(&self) -> f64 {
        self.premarket_price - self.last_close
    }
}
