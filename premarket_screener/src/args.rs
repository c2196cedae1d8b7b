//! Command-line arguments for the premarket screener.
//!
//! This module defines the CLI interface using `clap`. Global flags configure
//! the data layer and fall back to environment variables; see `main` for
//! end-to-end usage.
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use premarket_common::Ticker;
use premarket_common::constants::{
    DATA_MODE_ENV, HISTORY_DAYS, PRIMARY_API_KEY_ENV, SECONDARY_API_KEY_ENV, SEED_ENV,
};
use premarket_data::{DataMode, MarketConfig};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Premarket gap screener over mock market data", long_about = None)]
pub struct Args {
    /// Where quotes come from.
    #[arg(long, value_enum, env = DATA_MODE_ENV, default_value_t = ModeArg::Mock, global = true)]
    pub mode: ModeArg,

    /// Credential for the primary live provider.
    #[arg(long, env = PRIMARY_API_KEY_ENV, hide_env_values = true, global = true)]
    pub primary_api_key: Option<String>,

    /// Credential for the secondary live provider.
    #[arg(long, env = SECONDARY_API_KEY_ENV, hide_env_values = true, global = true)]
    pub secondary_api_key: Option<String>,

    /// Fixed seed for reproducible mock data.
    #[arg(long, env = SEED_ENV, global = true)]
    pub seed: Option<u64>,

    /// Screener command.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI spelling of `DataMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Mock generator only.
    Mock,
    /// Credentialed live providers first.
    Live,
}

impl From<ModeArg> for DataMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mock => DataMode::Mock,
            ModeArg::Live => DataMode::Live,
        }
    }
}

/// Screener subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one quote snapshot.
    Quotes {
        #[command(flatten)]
        symbols: SymbolArgs,

        /// Serve the literal fixture instead of generated quotes.
        #[arg(long)]
        fixture: bool,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the daily series of one symbol.
    History {
        /// Symbol to chart.
        #[arg(value_enum, ignore_case = true)]
        symbol: Ticker,

        /// Trailing calendar days.
        #[arg(long, default_value_t = HISTORY_DAYS)]
        days: u32,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Refresh the quote table on an interval until Ctrl+C.
    Watch {
        #[command(flatten)]
        symbols: SymbolArgs,

        /// Seconds between refreshes.
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
    },
}

/// Symbol selection shared by `quotes` and `watch`.
#[derive(Debug, ClapArgs)]
pub struct SymbolArgs {
    /// Symbols, comma separated. Defaults to the watch list.
    #[arg(long, value_enum, value_delimiter = ',', ignore_case = true)]
    pub symbols: Vec<Ticker>,

    /// Read symbols from a text file instead.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[arg(long, conflicts_with = "symbols")]
    pub path: Option<String>,

    /// Show the whole universe.
    #[arg(long, conflicts_with_all = ["symbols", "path"])]
    pub all: bool,
}

impl Args {
    /// Data-layer configuration from the global flags.
    pub fn market_config(&self) -> MarketConfig {
        MarketConfig {
            mode: self.mode.into(),
            primary_api_key: non_blank(&self.primary_api_key),
            secondary_api_key: non_blank(&self.secondary_api_key),
            seed: self.seed,
            ..MarketConfig::default()
        }
    }
}

impl Command {
    /// Refresh interval for `watch`.
    pub fn interval(&self) -> Option<Duration> {
        match self {
            Command::Watch { interval_secs, .. } => Some(Duration::from_secs(*interval_secs)),
            _ => None,
        }
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
pub fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
