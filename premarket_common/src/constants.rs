//! Shared defaults for the data layer and the screener.

use std::time::Duration;

/// Interval between quote refreshes.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Trailing calendar days covered by a daily series (the series holds one more bar).
pub const HISTORY_DAYS: u32 = 90;

/// Environment variable holding the primary provider credential.
pub const PRIMARY_API_KEY_ENV: &str = "POLYGON_API_KEY";

/// Environment variable holding the secondary provider credential.
pub const SECONDARY_API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// Environment variable selecting `mock` or `live` data.
pub const DATA_MODE_ENV: &str = "PREMARKET_DATA_MODE";

/// Environment variable holding a fixed RNG seed.
pub const SEED_ENV: &str = "PREMARKET_SEED";

/// Longest daily-series window accepted, in days.
pub const MAX_HISTORY_DAYS: u32 = 3650;
