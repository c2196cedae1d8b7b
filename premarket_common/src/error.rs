//! Error types shared by the data crate and the screener.
//!
//! The `MarketError` enum unifies the failure cases of the workspace: I/O and
//! serialization problems, symbol resolution, provider failures along the
//! provider chain, configuration and lock poisoning. Crates propagate
//! this single type with `?`.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the data layer and the screener.
#[derive(Error, Debug)]
pub enum MarketError {
    /// I/O error originating from the standard library (files, terminal output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error while parsing a ticker list into `Ticker` values.
    #[error("Parse tickers error: {0}")]
    ParseTickers(String),

    /// The requested symbol is not a member of the ticker universe.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// A provider call failed (network, parse or upstream error).
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error.
        provider: String,
        /// Human-readable failure description.
        message: String,
    },

    /// Invalid configuration value.
    #[error("Config error: {0}")]
    Config(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl MarketError {
    /// Shorthand for a provider failure.
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        MarketError::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

impl<T> From<PoisonError<T>> for MarketError {
    fn from(err: PoisonError<T>) -> Self {
        MarketError::MutexLock(err.to_string())
    }
}
