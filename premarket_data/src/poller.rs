//! Quote refresh loop.
//!
//! `QuotePoller::start` spawns a background thread that fetches once
//! immediately and then once per interval from a shared [`ProviderChain`],
//! publishing each cycle as a [`PollEvent`] on a `crossbeam_channel`. Every
//! `Updated` event carries a complete snapshot meant to replace the previous
//! one; there is no partial merge.
//!
//! Cancellation:
//! - `PollerHandle::cancel` raises a cancel flag and wakes the thread through
//!   its stop channel; `stop` (or dropping the handle) also joins it.
//! - Intervals shorter than [`MIN_POLL_INTERVAL`] are raised to it.
//! - A fetch that completes after cancellation is discarded rather than sent.
//! - The loop also ends when the consumer drops the event receiver.
//!
//! Daily series are not polled; consumers request them on demand.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender, select, tick, unbounded};
use log::{debug, error, info, warn};
use premarket_common::{QuoteMap, Ticker};

use crate::provider::ProviderChain;

/// Shortest refresh period the poller will run at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// One complete fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSnapshot {
    /// Quotes keyed by symbol.
    pub quotes: QuoteMap,
    /// Provider that served the cycle.
    pub source: &'static str,
    /// When the cycle completed.
    pub fetched_at: DateTime<Utc>,
}

/// Message sent by the poller to its consumer.
#[derive(Debug, Clone)]
pub enum PollEvent {
    /// Fresh snapshot replacing the previous one.
    Updated(QuoteSnapshot),
    /// The whole fetch failed; the previous snapshot stays current.
    Failed(String),
}

/// Background quote poller.
pub struct QuotePoller;

impl QuotePoller {
    /// Start polling `symbols` from `chain` every `interval`.
    ///
    /// An `interval` below [`MIN_POLL_INTERVAL`] (including zero) is clamped.
    pub fn start(chain: Arc<ProviderChain>, symbols: Vec<Ticker>, interval: Duration) -> PollerHandle {
        let interval = effective_interval(interval);
        let (event_tx, event_rx) = unbounded::<PollEvent>();
        let (stop_tx, stop_rx) = unbounded::<()>();
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_cancelled = Arc::clone(&cancelled);

        let worker = thread::spawn(move || {
            info!(
                "Quote poller started for {} symbols every {:?} (Thread ID: {:?})",
                symbols.len(),
                interval,
                thread::current().id()
            );
            let ticker = tick(interval);

            if poll_once(&chain, &symbols, &event_tx, &worker_cancelled) {
                loop {
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            if !poll_once(&chain, &symbols, &event_tx, &worker_cancelled) {
                                break;
                            }
                        }
                    }
                }
            }
            info!("Quote poller stopping...");
        });

        PollerHandle {
            events: event_rx,
            stop_tx,
            cancelled,
            worker: Some(worker),
        }
    }
}

fn effective_interval(interval: Duration) -> Duration {
    if interval < MIN_POLL_INTERVAL {
        warn!("Poll interval {:?} is too short, using {:?}", interval, MIN_POLL_INTERVAL);
        return MIN_POLL_INTERVAL;
    }
    interval
}

/// Fetch one cycle and publish it. Returns `false` when the loop should end.
fn poll_once(
    chain: &ProviderChain,
    symbols: &[Ticker],
    event_tx: &Sender<PollEvent>,
    cancelled: &AtomicBool,
) -> bool {
    let event = match chain.fetch(symbols) {
        Ok(result) => {
            debug!("Poll cycle: {} quotes from '{}'", result.quotes.len(), result.source);
            PollEvent::Updated(QuoteSnapshot {
                quotes: result.quotes,
                source: result.source,
                fetched_at: chain.now(),
            })
        }
        Err(e) => {
            error!("Error fetching market data: {}", e);
            PollEvent::Failed(e.to_string())
        }
    };

    if cancelled.load(Ordering::SeqCst) {
        debug!("Poller cancelled, discarding late result");
        return false;
    }
    event_tx.send(event).is_ok()
}

/// Owner of a running poller.
pub struct PollerHandle {
    events: Receiver<PollEvent>,
    stop_tx: Sender<()>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stream of poll results.
    pub fn events(&self) -> &Receiver<PollEvent> {
        &self.events
    }

    /// Whether the background thread is still running.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| !worker.is_finished())
    }

    /// Ask the thread to exit without waiting for it.
    ///
    /// A fetch already in flight finishes, but its result is never sent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        let _ = self.stop_tx.send(());
    }

    /// Cancel the timer and wait for the thread to exit. Idempotent.
    pub fn stop(&mut self) {
        self.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Quote poller thread panicked");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::provider::{MockQuoteProvider, QuoteProvider, QuoteRequest};
    use chrono::TimeZone;
    use crossbeam_channel::{RecvTimeoutError, bounded};
    use std::time::Instant;
    use premarket_common::tickers::DEFAULT_WATCHLIST;
    use premarket_common::{MarketError, Result};

    const WAIT: Duration = Duration::from_secs(5);

    struct BrokenProvider;

    impl QuoteProvider for BrokenProvider {
        fn id(&self) -> &'static str {
            "BROKEN"
        }

        fn fetch_quotes(&self, _request: &QuoteRequest<'_>) -> Result<QuoteMap> {
            Err(MarketError::provider("BROKEN", "upstream down"))
        }
    }

    /// Blocks each fetch until the test releases it.
    struct GatedProvider {
        entered: Sender<()>,
        release: Receiver<()>,
    }

    impl QuoteProvider for GatedProvider {
        fn id(&self) -> &'static str {
            "GATED"
        }

        fn fetch_quotes(&self, request: &QuoteRequest<'_>) -> Result<QuoteMap> {
            let _ = self.entered.send(());
            let _ = self.release.recv();
            MockQuoteProvider::seeded(1).fetch_quotes(request)
        }
    }

    fn chain(provider: Box<dyn QuoteProvider>) -> Arc<ProviderChain> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap());
        Arc::new(ProviderChain::new(provider, Arc::new(clock)))
    }

    #[test]
    fn test_first_fetch_is_immediate() {
        let chain = chain(Box::new(MockQuoteProvider::seeded(3)));
        let mut handle = QuotePoller::start(chain, DEFAULT_WATCHLIST.to_vec(), Duration::from_secs(3600));

        match handle.events().recv_timeout(WAIT).unwrap() {
            PollEvent::Updated(snapshot) => {
                assert_eq!(snapshot.quotes.len(), 4);
                assert_eq!(snapshot.source, "MOCK");
                assert_eq!(snapshot.fetched_at, Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap());
            }
            PollEvent::Failed(e) => panic!("unexpected failure: {}", e),
        }
        assert!(handle.is_running());
        handle.stop();
        assert!(!handle.is_running());
    }

    #[test]
    fn test_refreshes_on_interval() {
        let chain = chain(Box::new(MockQuoteProvider::seeded(4)));
        let handle = QuotePoller::start(chain, vec![Ticker::NVDA], Duration::from_millis(20));

        let mut prices = Vec::new();
        for _ in 0..3 {
            match handle.events().recv_timeout(WAIT).unwrap() {
                PollEvent::Updated(snapshot) => {
                    assert_eq!(snapshot.quotes.len(), 1);
                    prices.push(snapshot.quotes[&Ticker::NVDA].premarket_price);
                }
                PollEvent::Failed(e) => panic!("unexpected failure: {}", e),
            }
        }
        assert_ne!(prices[0], prices[1]);
    }

    #[test]
    fn test_stop_closes_the_event_stream() {
        let chain = chain(Box::new(MockQuoteProvider::seeded(5)));
        let mut handle = QuotePoller::start(chain, vec![Ticker::SPY], Duration::from_millis(10));
        handle.events().recv_timeout(WAIT).unwrap();
        handle.stop();
        handle.stop();

        while handle.events().try_recv().is_ok() {}
        assert_eq!(
            handle.events().recv_timeout(Duration::from_millis(50)).unwrap_err(),
            RecvTimeoutError::Disconnected
        );
    }

    #[test]
    fn test_total_failure_is_reported() {
        let chain = chain(Box::new(BrokenProvider));
        let handle = QuotePoller::start(chain, DEFAULT_WATCHLIST.to_vec(), Duration::from_secs(3600));
        match handle.events().recv_timeout(WAIT).unwrap() {
            PollEvent::Failed(message) => assert!(message.contains("upstream down")),
            PollEvent::Updated(_) => panic!("broken provider produced quotes"),
        }
    }

    #[test]
    fn test_drop_stops_worker() {
        let chain = chain(Box::new(MockQuoteProvider::seeded(6)));
        let handle = QuotePoller::start(chain, vec![Ticker::QQQ], Duration::from_millis(10));
        let events = handle.events().clone();
        events.recv_timeout(WAIT).unwrap();
        drop(handle);

        while events.try_recv().is_ok() {}
        assert_eq!(
            events.recv_timeout(Duration::from_millis(50)).unwrap_err(),
            RecvTimeoutError::Disconnected
        );
    }

    #[test]
    fn test_result_finished_after_cancel_is_discarded() {
        let (entered_tx, entered_rx) = bounded(1);
        let (release_tx, release_rx) = bounded(1);
        let provider = GatedProvider {
            entered: entered_tx,
            release: release_rx,
        };
        let mut handle = QuotePoller::start(chain(Box::new(provider)), vec![Ticker::NVDA], Duration::from_secs(3600));

        entered_rx.recv_timeout(WAIT).unwrap();
        handle.cancel();
        release_tx.send(()).unwrap();
        handle.stop();

        assert!(!handle.is_running());
        assert_eq!(
            handle.events().recv_timeout(Duration::from_millis(50)).unwrap_err(),
            RecvTimeoutError::Disconnected
        );
    }

    #[test]
    fn test_short_interval_is_clamped() {
        assert_eq!(effective_interval(Duration::ZERO), MIN_POLL_INTERVAL);
        assert_eq!(effective_interval(Duration::from_millis(1)), MIN_POLL_INTERVAL);
        assert_eq!(effective_interval(Duration::from_secs(60)), Duration::from_secs(60));
    }

    #[test]
    fn test_zero_interval_polls_at_the_floor() {
        let started = Instant::now();
        let chain = chain(Box::new(MockQuoteProvider::seeded(7)));
        let mut handle = QuotePoller::start(chain, vec![Ticker::SPY], Duration::ZERO);

        for _ in 0..3 {
            assert!(matches!(handle.events().recv_timeout(WAIT).unwrap(), PollEvent::Updated(_)));
        }
        handle.stop();
        let elapsed = started.elapsed();

        let mut received = 3;
        while handle.events().try_recv().is_ok() {
            received += 1;
        }
        let ceiling = elapsed.as_millis() / MIN_POLL_INTERVAL.as_millis() + 2;
        assert!(received as u128 <= ceiling, "{} events in {:?}", received, elapsed);
        assert!(elapsed >= MIN_POLL_INTERVAL * 2);
    }
}
