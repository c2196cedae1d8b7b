//! Plain-text rendering of quote tables and daily series.

use std::io::Write;

use chrono::{DateTime, Local, Utc};
use premarket_common::format::{GapDirection, format_number, format_volume};
use premarket_common::{DailyBar, QuoteMap, Result};

/// Write the screener table: one row per symbol.
///
/// The gap column is derived from the prices, not taken from the stored field.
pub fn write_quote_table<W: Write>(
    out: &mut W,
    quotes: &QuoteMap,
    source: &str,
    updated: DateTime<Utc>,
) -> Result<()> {
    writeln!(
        out,
        "Premarket Screener  [{}]  Updated: {}",
        source,
        updated.with_timezone(&Local).format("%H:%M:%S")
    )?;
    writeln!(
        out,
        "{:<6} {:>12} {:>12} {:>10} {:>10} {:>8}",
        "Symbol", "Last Close", "Premarket", "Gap %", "Volume", "ATR(14)"
    )?;
    for quote in quotes.values() {
        let gap_percent = quote.computed_gap_percent();
        let gap = format!(
            "{}{}%",
            GapDirection::from_gap(gap_percent),
            format_number(gap_percent, 2)
        );
        writeln!(
            out,
            "{:<6} {:>12} {:>12} {:>10} {:>10} {:>8}",
            quote.symbol.to_string(),
            format_number(quote.last_close, 2),
            format_number(quote.premarket_price, 2),
            gap,
            format_volume(quote.premarket_volume),
            format_number(quote.atr14, 2)
        )?;
    }
    Ok(())
}

/// Write one line per daily bar, oldest first.
pub fn write_series<W: Write>(out: &mut W, symbol: &str, bars: &[DailyBar]) -> Result<()> {
    writeln!(out, "{} daily bars: {}", symbol, bars.len())?;
    writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>10} {:>10}",
        "Date", "Open", "High", "Low", "Close"
    )?;
    for bar in bars {
        writeln!(
            out,
            "{:<10} {:>10} {:>10} {:>10} {:>10} {}",
            bar.time.format("%Y-%m-%d").to_string(),
            format_number(bar.open, 2),
            format_number(bar.high, 2),
            format_number(bar.low, 2),
            format_number(bar.close, 2),
            if bar.is_bullish() { "+" } else { "-" }
        )?;
    }
    Ok(())
}
