//! Random-walk daily OHLC series for the candlestick chart.
//!
//! A series always holds `days + 1` bars, one per calendar day (weekends
//! included) from `today - days` through `today`, oldest first. The window is
//! computed from the calendar date alone, so two calls on the same day always
//! agree on length and range.
//!
//! Each day steps from the previous close:
//! - `open  = prev * (1 + uniform(-0.5%, 0.5%))`
//! - `high  = max(open, prev) * (1 + uniform(0%, 2%))`
//! - `low   = min(open, prev) * (1 - uniform(0%, 2%))`
//! - `close = low + uniform(0, 1) * (high - low)`
//!
//! Every value is rounded to cents before it is used further. Volatile symbols
//! get a second pass that widens the band by 10% on each side and resamples
//! the close inside it; that pass draws only after the whole walk, so the base
//! walk is the same as any other symbol's under the same seed.

use chrono::{Days, NaiveDate};
use log::debug;
use premarket_common::bar::round_cents;
use premarket_common::constants::{HISTORY_DAYS, MAX_HISTORY_DAYS};
use premarket_common::{DailyBar, MarketError, Result, Ticker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Clock;

/// Lowest possible seed price.
const SEED_PRICE_MIN: f64 = 50.0;
/// Highest possible seed price.
const SEED_PRICE_MAX: f64 = 550.0;
/// Maximum relative open-vs-previous-close move.
const OPEN_DRIFT: f64 = 0.005;
/// Maximum relative extension of high/low beyond open and previous close.
const RANGE_EXTENSION: f64 = 0.02;
/// Multiplier applied to `high` for volatile symbols.
const VOLATILE_HIGH: f64 = 1.1;
/// Multiplier applied to `low` for volatile symbols.
const VOLATILE_LOW: f64 = 0.9;

/// Generator for trailing daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalSeriesGenerator {
    days: u32,
}

impl Default for HistoricalSeriesGenerator {
    fn default() -> Self {
        HistoricalSeriesGenerator { days: HISTORY_DAYS }
    }
}

impl HistoricalSeriesGenerator {
    /// Generator covering `days` trailing calendar days.
    ///
    /// `days` must lie in `1..=MAX_HISTORY_DAYS`.
    pub fn new(days: u32) -> Result<Self> {
        if days == 0 || days > MAX_HISTORY_DAYS {
            return Err(MarketError::Config(format!(
                "history window must be between 1 and {} days, got {}",
                MAX_HISTORY_DAYS, days
            )));
        }
        Ok(HistoricalSeriesGenerator { days })
    }

    /// Trailing window length in days.
    pub fn days(&self) -> u32 {
        self.days
    }

    /// First and last date of the series ending `today`.
    pub fn window(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
        let start = today
            .checked_sub_days(Days::new(u64::from(self.days)))
            .ok_or_else(|| {
                MarketError::Config(format!("{} days before {} is out of range", self.days, today))
            })?;
        Ok((start, today))
    }

    /// Daily bars for `ticker` ending `today`, drawn from `rng`.
    pub fn daily_series<R: Rng + ?Sized>(
        &self,
        ticker: Ticker,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<DailyBar>> {
        let (start, end) = self.window(today)?;
        let mut bars = random_walk(start, end, rng);
        if ticker.is_volatile() {
            widen(&mut bars, rng);
        }
        debug!("Generated {} daily bars for {} ({} .. {})", bars.len(), ticker, start, end);
        Ok(bars)
    }

    /// Same as [`Self::daily_series`] for a raw symbol string.
    ///
    /// Symbols outside the universe yield `TickerNotFound`.
    pub fn series_for_symbol<R: Rng + ?Sized>(
        &self,
        symbol: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<DailyBar>> {
        let ticker = Ticker::resolve(symbol)?;
        self.daily_series(ticker, today, rng)
    }

    /// Reproducible series for a fixed seed.
    pub fn seeded_series(&self, ticker: Ticker, today: NaiveDate, seed: u64) -> Result<Vec<DailyBar>> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.daily_series(ticker, today, &mut rng)
    }

    /// Series ending on the clock's current date, seeded when `seed` is set.
    pub fn series(
        &self,
        ticker: Ticker,
        clock: &dyn Clock,
        seed: Option<u64>,
    ) -> Result<Vec<DailyBar>> {
        let today = clock.today();
        match seed {
            Some(seed) => self.seeded_series(ticker, today, seed),
            None => self.daily_series(ticker, today, &mut rand::rng()),
        }
    }
}

fn random_walk<R: Rng + ?Sized>(start: NaiveDate, end: NaiveDate, rng: &mut R) -> Vec<DailyBar> {
    let mut prev_close = round_cents(rng.random_range(SEED_PRICE_MIN..=SEED_PRICE_MAX));
    let mut bars = Vec::new();

    for time in start.iter_days().take_while(|day| *day <= end) {
        let open = round_cents(prev_close * (1.0 + rng.random_range(-OPEN_DRIFT..OPEN_DRIFT)));
        let high =
            round_cents(open.max(prev_close) * (1.0 + rng.random_range(0.0..RANGE_EXTENSION)));
        let low =
            round_cents(open.min(prev_close) * (1.0 - rng.random_range(0.0..RANGE_EXTENSION)));
        let close = round_cents(low + rng.random::<f64>() * (high - low));

        bars.push(DailyBar {
            time,
            open,
            high,
            low,
            close,
        });
        prev_close = close;
    }
    bars
}

fn widen<R: Rng + ?Sized>(bars: &mut [DailyBar], rng: &mut R) {
    for bar in bars.iter_mut() {
        bar.high = round_cents(bar.high * VOLATILE_HIGH);
        bar.low = round_cents(bar.low * VOLATILE_LOW);
        bar.close = round_cents(bar.low + rng.random::<f64>() * (bar.high - bar.low));
    }
}
