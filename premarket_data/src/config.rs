//! Data-layer configuration.
//!
//! `MarketConfig` replaces a module-level mock/live switch: the mode, the two
//! optional provider credentials, the polling interval, the history window
//! and an optional RNG seed are injected into the provider chain at
//! construction. The screener fills it from CLI flags and environment
//! variables; `from_env` covers library users.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use premarket_common::constants::{
    DATA_MODE_ENV, HISTORY_DAYS, MAX_HISTORY_DAYS, POLL_INTERVAL, PRIMARY_API_KEY_ENV,
    SECONDARY_API_KEY_ENV, SEED_ENV,
};
use premarket_common::{MarketError, Result};
use strum_macros::{Display, EnumString};

/// Whether live providers are consulted before the mock generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DataMode {
    /// Only the mock generator is used.
    #[default]
    Mock,
    /// Credentialed live providers first, mock as the last resort.
    Live,
}

/// Configuration for the provider chain, the poller and the series generator.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Mock or live routing.
    pub mode: DataMode,
    /// Credential gating the primary provider.
    pub primary_api_key: Option<String>,
    /// Credential gating the secondary provider.
    pub secondary_api_key: Option<String>,
    /// Delay between quote refreshes.
    pub poll_interval: Duration,
    /// Trailing calendar days of daily bars.
    pub history_days: u32,
    /// Fixed seed for the mock generators; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            mode: DataMode::Mock,
            primary_api_key: None,
            secondary_api_key: None,
            poll_interval: POLL_INTERVAL,
            history_days: HISTORY_DAYS,
            seed: None,
        }
    }
}

impl MarketConfig {
    /// Build a configuration from the process environment.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = MarketConfig::default();
        if let Some(mode) = value(DATA_MODE_ENV) {
            config.mode = DataMode::from_str(&mode)
                .map_err(|_| MarketError::Config(format!("{}: unknown data mode '{}'", DATA_MODE_ENV, mode)))?;
        }
        config.primary_api_key = value(PRIMARY_API_KEY_ENV);
        config.secondary_api_key = value(SECONDARY_API_KEY_ENV);
        if let Some(seed) = value(SEED_ENV) {
            let seed = seed
                .parse::<u64>()
                .map_err(|e| MarketError::Config(format!("{}: {}", SEED_ENV, e)))?;
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the routing mode.
    pub fn with_mode(mut self, mode: DataMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the primary provider credential.
    pub fn with_primary_api_key(mut self, key: impl Into<String>) -> Self {
        self.primary_api_key = Some(key.into());
        self
    }

    /// Set the secondary provider credential.
    pub fn with_secondary_api_key(mut self, key: impl Into<String>) -> Self {
        self.secondary_api_key = Some(key.into());
        self
    }

    /// Set the refresh interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the daily-series window.
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    /// Pin the mock generators to a seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the poller and the series generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(MarketError::Config("poll interval must be positive".to_string()));
        }
        if self.history_days == 0 {
            return Err(MarketError::Config("history window must cover at least one day".to_string()));
        }
        if self.history_days > MAX_HISTORY_DAYS {
            return Err(MarketError::Config(format!(
                "history window is capped at {} days, got {}",
                MAX_HISTORY_DAYS, self.history_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.mode, DataMode::Mock);
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.history_days, 90);
        assert!(config.primary_api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = MarketConfig::from_lookup(lookup(&[
            ("PREMARKET_DATA_MODE", "LIVE"),
            ("POLYGON_API_KEY", "pk"),
            ("FINNHUB_API_KEY", "  "),
            ("PREMARKET_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!(config.mode, DataMode::Live);
        assert_eq!(config.primary_api_key.as_deref(), Some("pk"));
        assert_eq!(config.secondary_api_key, None);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(MarketConfig::from_lookup(lookup(&[("PREMARKET_DATA_MODE", "paper")])).is_err());
        assert!(MarketConfig::from_lookup(lookup(&[("PREMARKET_SEED", "-1")])).is_err());
    }

    #[test]
    fn test_validate() {
        let config = MarketConfig::default().with_poll_interval(Duration::ZERO);
        assert!(matches!(config.validate(), Err(MarketError::Config(_))));
        let config = MarketConfig::default().with_history_days(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_history_window_is_rejected() {
        let config = MarketConfig::default().with_history_days(u32::MAX);
        assert!(matches!(config.validate(), Err(MarketError::Config(_))));
        let config = MarketConfig::default().with_history_days(MAX_HISTORY_DAYS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_data_mode_display() {
        assert_eq!(DataMode::Live.to_string(), "live");
        assert_eq!(DataMode::from_str("Mock").unwrap(), DataMode::Mock);
    }
}
