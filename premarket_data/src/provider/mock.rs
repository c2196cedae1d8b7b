//! Volatility-conditioned mock quote model.
//!
//! Each symbol starts from its profile's baseline close. The premarket move is
//! a uniform draw scaled by the symbol's volatility, so the gap is always
//! consistent with the two prices:
//!
//! - `change = uniform(-1, 1) * volatility * last_close`
//! - `premarket_price = last_close + change`
//! - `gap_percent = change / last_close * 100`
//! - `premarket_volume = floor(avg_volume * uniform(0.5, 1.5) * 0.1)`
//! - `atr14 = last_close * uniform(0.01, 0.03)`

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::debug;
use premarket_common::{Quote, QuoteMap, Result, Ticker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{QuoteProvider, QuoteRequest};

/// Share of the average daily volume that trades premarket.
const PREMARKET_VOLUME_SHARE: f64 = 0.1;

/// Generate one quote for `ticker` from the mock model.
pub fn generate_quote<R: Rng + ?Sized>(ticker: Ticker, now: DateTime<Utc>, rng: &mut R) -> Quote {
    let profile = ticker.profile();
    let last_close = profile.last_close;

    let change = rng.random_range(-1.0_f64..1.0) * profile.volatility * last_close;
    let premarket_price = last_close + change;
    let gap_percent = change / last_close * 100.0;

    let volume_multiplier = rng.random_range(0.5_f64..1.5);
    let premarket_volume =
        (profile.avg_volume as f64 * volume_multiplier * PREMARKET_VOLUME_SHARE).floor() as u64;

    let atr14 = last_close * rng.random_range(0.01_f64..0.03);

    Quote {
        symbol: ticker,
        last_close,
        premarket_price,
        premarket_volume,
        atr14,
        gap_percent,
        updated_at: now,
    }
}

/// Always-available provider backed by the mock model.
///
/// The RNG sits behind a `Mutex` so a single provider can be shared with the
/// poller thread.
pub struct MockQuoteProvider {
    rng: Mutex<StdRng>,
}

impl MockQuoteProvider {
    /// Provider with a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        MockQuoteProvider {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Provider seeded from the operating system.
    pub fn from_entropy() -> Self {
        MockQuoteProvider {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn with_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl QuoteProvider for MockQuoteProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    fn fetch_quotes(&self, request: &QuoteRequest<'_>) -> Result<QuoteMap> {
        let mut rng = self.rng.lock()?;
        let quotes: QuoteMap = request
            .symbols
            .iter()
            .map(|ticker| (*ticker, generate_quote(*ticker, request.now, &mut *rng)))
            .collect();
        debug!("Mock generator produced {} quotes", quotes.len());
        Ok(quotes)
    }
}
