//! Daily OHLC bar used by the candlestick chart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Round a price to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One calendar day's open, high, low and close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub time: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

impl DailyBar {
    /// `low <= open, close <= high`.
    pub fn is_well_formed(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }

    /// Whether the bar closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> DailyBar {
        DailyBar {
            time: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            open,
            high,
            low,
            close,
        }
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.235_1), 1.24);
        assert_eq!(round_cents(round_cents(99.99)), 99.99);
    }

    #[test]
    fn test_well_formed() {
        assert!(bar(10.0, 11.0, 9.0, 10.5).is_well_formed());
        assert!(!bar(10.0, 10.2, 9.0, 10.5).is_well_formed());
        assert!(!bar(8.9, 11.0, 9.0, 10.5).is_well_formed());
    }

    #[test]
    fn test_serializes_date_without_time() {
        let json = serde_json::to_value(bar(1.0, 2.0, 0.5, 1.5)).unwrap();
        assert_eq!(json["time"], "2024-03-01");
        assert!(bar(1.0, 2.0, 0.5, 1.5).is_bullish());
    }
}
