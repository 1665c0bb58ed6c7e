//! Periodic background refresh.
//!
//! All network work runs on the tokio runtime; outcomes are handed back to
//! the interactive thread over an mpsc channel. At most one fetch is in
//! flight: a tick that lands while one is outstanding is skipped, not
//! queued. An in-flight fetch is never cancelled; it completes or times
//! out on its own (bounded by the provider's per-request timeout).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use hoodie_weather::{
    demo_location, generate_demo_observation, FetchError, Location, WeatherProvider,
};

use crate::state::{RefreshOutcome, WidgetState};

/// Floor on the tick period, whatever settings say.
const MIN_INTERVAL_SECS: u64 = 30;

/// Single-flight gate for refresh operations.
#[derive(Debug, Default)]
struct RefreshGate {
    busy: AtomicBool,
}

impl RefreshGate {
    fn try_acquire(self: &Arc<Self>) -> Option<InFlightGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| InFlightGuard(Arc::clone(self)))
    }
}

/// Releases the gate when the fetch finishes, however it finishes.
struct InFlightGuard(Arc<RefreshGate>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.busy.store(false, Ordering::Release);
    }
}

/// Cancellable periodic scheduler owned by the presentation layer.
/// Dropping it stops future ticks; an in-flight fetch is left to finish.
pub struct RefreshScheduler {
    handle: Handle,
    provider: Arc<WeatherProvider>,
    state: WidgetState,
    tx: Sender<RefreshOutcome>,
    gate: Arc<RefreshGate>,
    ticker: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Start the periodic ticker. The first fetch fires immediately.
    pub fn start(
        handle: Handle,
        provider: WeatherProvider,
        state: WidgetState,
        tx: Sender<RefreshOutcome>,
    ) -> Self {
        let provider = Arc::new(provider);
        let gate = Arc::new(RefreshGate::default());
        let interval_secs = state.settings().update_interval_secs.max(MIN_INTERVAL_SECS);

        let ticker = {
            let handle_inner = handle.clone();
            let provider = Arc::clone(&provider);
            let gate = Arc::clone(&gate);
            let state = state.clone();
            let tx = tx.clone();
            handle.spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                loop {
                    // First tick completes immediately.
                    interval.tick().await;
                    spawn_refresh(&handle_inner, &provider, &gate, &state, &tx);
                }
            })
        };

        Self {
            handle,
            provider,
            state,
            tx,
            gate,
            ticker,
        }
    }

    /// Kick a refresh now, e.g. after the user changes location. Shares
    /// the single-flight gate with the periodic ticker.
    pub fn request_refresh(&self) {
        spawn_refresh(&self.handle, &self.provider, &self.gate, &self.state, &self.tx);
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

fn spawn_refresh(
    handle: &Handle,
    provider: &Arc<WeatherProvider>,
    gate: &Arc<RefreshGate>,
    state: &WidgetState,
    tx: &Sender<RefreshOutcome>,
) {
    let Some(guard) = gate.try_acquire() else {
        tracing::debug!("Refresh already in flight; skipping tick");
        return;
    };

    let provider = Arc::clone(provider);
    let manual = state.settings().manual_location;
    let tx = tx.clone();
    handle.spawn(async move {
        let outcome = fetch_cycle(&provider, manual).await;
        let _ = tx.send(outcome);
        drop(guard);
    });
}

/// One full fetch: resolve a location, then its current conditions. Any
/// failure anywhere falls back to a synthetic observation so the display
/// always has something to show; background failures are logged, never
/// surfaced.
pub async fn fetch_cycle(provider: &WeatherProvider, manual: Option<Location>) -> RefreshOutcome {
    let location = match manual {
        Some(location) => location,
        None => match provider.locate_by_ip().await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!("Location detection failed: {}; showing demo data", e);
                return demo_outcome();
            }
        },
    };

    match provider
        .fetch_forecast(location.latitude, location.longitude)
        .await
    {
        Ok(observation) => RefreshOutcome {
            location,
            observation,
        },
        Err(e) => {
            tracing::warn!("Forecast fetch failed: {}; showing demo data", e);
            demo_outcome()
        }
    }
}

fn demo_outcome() -> RefreshOutcome {
    RefreshOutcome {
        location: demo_location(),
        observation: generate_demo_observation(),
    }
}

/// Validate a user-entered place name. Unlike background refresh failures
/// this error IS surfaced, via `FetchError::user_message`, since it comes
/// from direct user input.
///
/// # Errors
/// Whatever `WeatherProvider::geocode` reports.
pub async fn resolve_manual_location(
    provider: &WeatherProvider,
    query: &str,
) -> Result<Location, FetchError> {
    provider.geocode(query).await
}
