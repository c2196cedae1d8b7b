//! Premarket Screener — a terminal consumer of the premarket data core.
//!
//! It prints a quote snapshot for a list of symbols, prints one symbol's daily
//! OHLC series, or keeps a quote table refreshed on a fixed interval until
//! Ctrl+C.
//!
//! Usage example (CLI):
//! ```bash
//! premarket_screener quotes --symbols nvda,tsla
//! premarket_screener --seed 42 history aapl --days 30
//! premarket_screener watch --path ./tickers.txt --interval-secs 60
//! ```
//!
//! Data always comes from the mock generator unless `--mode live` is given
//! and a live provider is registered with its credential.
#![warn(missing_docs)]
mod args;
mod render;

use crate::args::{Args, Command, SymbolArgs, normalize_path};
use clap::Parser;
use log::{error, info, warn};
use premarket_common::tickers::{DEFAULT_WATCHLIST, TickerParser};
use premarket_common::{MarketError, Result, Ticker};
use premarket_data::provider::FixtureQuoteProvider;
use premarket_data::{
    DataMode, HistoricalSeriesGenerator, MarketConfig, PollEvent, ProviderChain, QuotePoller,
    QuoteSnapshot, SystemClock,
};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

/// How often the watch loop checks for Ctrl+C while waiting for a refresh.
const SHUTDOWN_CHECK: Duration = Duration::from_millis(250);

fn main() -> Result<(), MarketError> {
    init_logger();
    let args = Args::parse();
    let config = args.market_config();

    match args.command {
        Command::Quotes {
            symbols,
            fixture,
            json,
        } => run_quotes(&config, &symbols, fixture, json),
        Command::History { symbol, days, json } => {
            run_history(&config.with_history_days(days), symbol, json)
        }
        Command::Watch {
            symbols,
            interval_secs,
        } => run_watch(
            &config.with_poll_interval(Duration::from_secs(interval_secs)),
            &symbols,
        ),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Resolve the symbol selection: explicit list, file, whole universe or the default watch list.
fn resolve_symbols(selection: &SymbolArgs) -> Result<Vec<Ticker>> {
    if selection.all {
        return Ok(Ticker::universe());
    }
    if let Some(raw) = &selection.path {
        let path = normalize_path(raw);
        let file = File::open(&path).map_err(MarketError::Io)?;
        let tickers = Ticker::parse_from_reader(BufReader::new(file))?;
        if tickers.is_empty() {
            return Err(MarketError::ParseTickers(format!(
                "no symbols in {}",
                path.display()
            )));
        }
        info!("Tickers: {:?}", tickers);
        return Ok(tickers);
    }
    if selection.symbols.is_empty() {
        return Ok(DEFAULT_WATCHLIST.to_vec());
    }
    Ok(selection.symbols.clone())
}

fn build_chain(config: &MarketConfig) -> ProviderChain {
    let chain = ProviderChain::from_config(config);
    if config.mode == DataMode::Live && chain.available_providers().is_empty() {
        warn!("Live mode requested but no live provider is registered, using mock data");
    }
    chain
}

fn run_quotes(config: &MarketConfig, selection: &SymbolArgs, fixture: bool, json: bool) -> Result<()> {
    config.validate()?;
    let symbols = resolve_symbols(selection)?;
    let chain = if fixture {
        ProviderChain::new(Box::new(FixtureQuoteProvider), Arc::new(SystemClock))
    } else {
        build_chain(config)
    };

    let result = chain.fetch(&symbols)?;
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &result.quotes)?;
        writeln!(stdout)?;
    } else {
        render::write_quote_table(&mut stdout, &result.quotes, result.source, chain.now())?;
    }
    Ok(())
}

fn run_history(config: &MarketConfig, symbol: Ticker, json: bool) -> Result<()> {
    config.validate()?;
    let generator = HistoricalSeriesGenerator::new(config.history_days)?;
    let bars = generator.series(symbol, &SystemClock, config.seed)?;

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &bars)?;
        writeln!(stdout)?;
    } else {
        render::write_series(&mut stdout, &symbol.to_string(), &bars)?;
    }
    Ok(())
}

fn run_watch(config: &MarketConfig, selection: &SymbolArgs) -> Result<()> {
    config.validate()?;
    let symbols = resolve_symbols(selection)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down screener...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| MarketError::Io(io::Error::other(e.to_string())))?;
    }

    let chain = Arc::new(build_chain(config));
    let mut handle = QuotePoller::start(chain, symbols, config.poll_interval);
    let mut last_snapshot: Option<QuoteSnapshot> = None;

    info!("Screener is running. Press Ctrl+C to exit.");
    while !shutdown.load(Ordering::Relaxed) {
        let event = match handle.events().recv_timeout(SHUTDOWN_CHECK) {
            Ok(event) => event,
            Err(err) if err.is_timeout() => continue,
            Err(_) => {
                error!("Quote poller stopped unexpectedly");
                break;
            }
        };

        let mut stdout = io::stdout().lock();
        match event {
            PollEvent::Updated(snapshot) => {
                render::write_quote_table(
                    &mut stdout,
                    &snapshot.quotes,
                    snapshot.source,
                    snapshot.fetched_at,
                )?;
                writeln!(stdout)?;
                last_snapshot = Some(snapshot);
            }
            PollEvent::Failed(message) => {
                error!("Failed to load market data: {}", message);
                if let Some(snapshot) = &last_snapshot {
                    warn!("Showing data from {}", snapshot.fetched_at);
                }
            }
        }
    }

    handle.stop();
    info!("Screener stopped");
    Ok(())
}
