//! Refresh scheduler: runs fetch → reconcile once immediately, then on every
//! interval tick until cancelled.
//!
//! # Overlap
//!
//! With [`OverlapPolicy::Concurrent`] each tick spawns an independent cycle
//! task, whether or not earlier cycles have finished. A slow request never
//! delays the next tick, and whichever cycle reaches the reconciler last
//! determines what is displayed.
//!
//! With [`OverlapPolicy::Chained`] the next cycle starts one interval after
//! the previous one settles, so cycles never overlap.
//!
//! In both modes a cycle runs in its own task: a panic inside it is caught at
//! the task boundary and counted as a failed cycle.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::status::SharedRefreshStatus;
use crate::feed::{FeedClient, FeedFetcher};
use crate::map::{MapContext, MarkerReconciler};

/// Default refresh interval in milliseconds.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 15_000;

/// Shortest interval the scheduler will tick at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// How a new tick treats a cycle that is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Every tick starts a cycle; cycles may overlap.
    #[default]
    Concurrent,
    /// Wait for the previous cycle, then one interval, before the next.
    Chained,
}

impl OverlapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapPolicy::Concurrent => "concurrent",
            OverlapPolicy::Chained => "chained",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concurrent" => Ok(OverlapPolicy::Concurrent),
            "chained" => Ok(OverlapPolicy::Chained),
            other => Err(format!("unknown overlap policy '{}'", other)),
        }
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Time between cycle starts (concurrent) or between a cycle settling and
    /// the next one starting (chained).
    pub interval: Duration,

    /// Overlap policy.
    pub overlap: OverlapPolicy,
}

impl RefreshConfig {
    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            ..Default::default()
        }
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            overlap: OverlapPolicy::default(),
        }
    }
}

/// Result of one fetch → reconcile cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The marker set was replaced.
    Updated { markers: usize },
    /// The fetch failed; the previous markers are still displayed.
    Failed { error: String },
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Updated { .. })
    }
}

/// State shared by the loop and every cycle task.
struct Shared<C: FeedClient> {
    fetcher: FeedFetcher<C>,
    context: MapContext,
    reconciler: MarkerReconciler,
    status: Arc<SharedRefreshStatus>,
}

impl<C: FeedClient> Shared<C> {
    async fn run_cycle(&self) -> CycleOutcome {
        let cycle = self.status.cycle_started();

        match self.fetcher.fetch().await {
            Ok(records) => {
                let markers = self.reconciler.reconcile(&self.context, &records);
                self.status.cycle_succeeded(markers);
                tracing::debug!(cycle, markers, "Refresh cycle complete");
                CycleOutcome::Updated { markers }
            }
            Err(e) => {
                let error = e.to_string();
                self.status.cycle_failed(error.clone());
                tracing::warn!(cycle, error = %e, "Refresh cycle failed, keeping previous markers");
                CycleOutcome::Failed { error }
            }
        }
    }

    /// Account for a cycle task that ended without settling itself.
    fn cycle_task_ended(&self, result: Result<CycleOutcome, JoinError>) {
        if let Err(e) = result {
            if e.is_panic() {
                tracing::error!("Refresh cycle panicked");
                self.status.cycle_failed("refresh cycle panicked");
            }
        }
    }
}

/// Periodic driver of the feed-refresh loop.
///
/// Owns the fetcher and the [`MapContext`]; cheap to clone (clones share the
/// same state).
pub struct RefreshScheduler<C: FeedClient> {
    shared: Arc<Shared<C>>,
    config: RefreshConfig,
}

impl<C: FeedClient> Clone for RefreshScheduler<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            config: self.config.clone(),
        }
    }
}

impl<C: FeedClient + 'static> RefreshScheduler<C> {
    /// Create a scheduler.
    pub fn new(fetcher: FeedFetcher<C>, context: MapContext, config: RefreshConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                fetcher,
                context,
                reconciler: MarkerReconciler::new(),
                status: SharedRefreshStatus::new(),
            }),
            config,
        }
    }

    /// Status handle for display.
    pub fn status(&self) -> Arc<SharedRefreshStatus> {
        Arc::clone(&self.shared.status)
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Start the loop as an async task.
    pub fn start(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            scheduler.run(cancel).await;
        })
    }

    /// Run the loop until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let interval = self.config.interval.max(MIN_INTERVAL);

        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            overlap = %self.config.overlap,
            "Refresh loop started"
        );

        match self.config.overlap {
            OverlapPolicy::Concurrent => self.run_concurrent(interval, &cancel).await,
            OverlapPolicy::Chained => self.run_chained(interval, &cancel).await,
        }

        self.shared.status.mark_stopped();
        tracing::info!("Refresh loop stopped");
    }

    /// Run a single cycle inline.
    pub async fn run_once(&self) -> CycleOutcome {
        self.shared.run_cycle().await
    }

    async fn run_concurrent(&self, interval: Duration, cancel: &CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut cycles = JoinSet::new();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                Some(result) = cycles.join_next(), if !cycles.is_empty() => {
                    self.shared.cycle_task_ended(result);
                }
                _ = ticker.tick() => {
                    let shared = Arc::clone(&self.shared);
                    cycles.spawn(async move { shared.run_cycle().await });
                }
            }
        }

        if !cycles.is_empty() {
            tracing::debug!(in_flight = cycles.len(), "Aborting in-flight refresh cycles");
        }
        cycles.shutdown().await;
    }

    async fn run_chained(&self, interval: Duration, cancel: &CancellationToken) {
        loop {
            let shared = Arc::clone(&self.shared);
            let mut task = tokio::spawn(async move { shared.run_cycle().await });

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    task.abort();
                    break;
                }
                result = &mut task => self.shared.cycle_task_ended(result),
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedPayload, FetchError};
    use crate::map::{GeoPoint, MapView, SharedMarkerLayer};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Client replaying queued responses, then an empty delivery.
    #[derive(Default)]
    struct ScriptedClient {
        responses: Mutex<VecDeque<Result<FeedPayload, FetchError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn push(&self, response: Result<FeedPayload, FetchError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl FeedClient for ScriptedClient {
        async fn fetch_payload(&self) -> Result<FeedPayload, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.responses.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(vehicles(&[])))
        }
    }

    fn vehicles(positions: &[(f64, f64)]) -> FeedPayload {
        let activity: Vec<_> = positions
            .iter()
            .map(|(lat, lon)| {
                json!({ "MonitoredVehicleJourney": {
                    "VehicleLocation": { "Latitude": lat, "Longitude": lon }
                } })
            })
            .collect();
        FeedPayload::from_value(json!({
            "Siri": { "ServiceDelivery": { "VehicleMonitoringDelivery": [
                { "VehicleActivity": activity }
            ] } }
        }))
    }

    fn scheduler(
        client: Arc<ScriptedClient>,
        config: RefreshConfig,
    ) -> (RefreshScheduler<Arc<ScriptedClient>>, Arc<SharedMarkerLayer>) {
        let layer = SharedMarkerLayer::new();
        let context = MapContext::new(MapView::new(GeoPoint::new(43.25, -2.93), 10), layer.clone());
        (
            RefreshScheduler::new(FeedFetcher::new(client), context, config),
            layer,
        )
    }

    #[test]
    fn test_overlap_policy_parse() {
        assert_eq!("Chained".parse::<OverlapPolicy>(), Ok(OverlapPolicy::Chained));
        assert_eq!(
            "concurrent".parse::<OverlapPolicy>(),
            Ok(OverlapPolicy::Concurrent)
        );
        assert!("serial".parse::<OverlapPolicy>().is_err());
        assert_eq!(OverlapPolicy::Chained.to_string(), "chained");
    }

    #[test]
    fn test_default_config() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval, Duration::from_secs(15));
        assert_eq!(config.overlap, OverlapPolicy::Concurrent);
        assert_eq!(
            RefreshConfig::from_millis(500).with_overlap(OverlapPolicy::Chained),
            RefreshConfig {
                interval: Duration::from_millis(500),
                overlap: OverlapPolicy::Chained,
            }
        );
    }

    #[tokio::test]
    async fn test_run_once_updates_layer_and_status() {
        let client = Arc::new(ScriptedClient::default());
        client.push(Ok(vehicles(&[(43.26, -2.93), (43.30, -2.98)])));
        let (scheduler, layer) = scheduler(client, RefreshConfig::default());

        let outcome = scheduler.run_once().await;

        assert_eq!(outcome, CycleOutcome::Updated { markers: 2 });
        assert_eq!(layer.len(), 2);
        let status = scheduler.status().snapshot();
        assert_eq!(status.cycles_succeeded, 1);
        assert_eq!(status.markers, 2);
        assert_eq!(status.in_flight, 0);
    }

    #[tokio::test]
    async fn test_failed_cycle_keeps_previous_markers() {
        let client = Arc::new(ScriptedClient::default());
        client.push(Ok(vehicles(&[(43.26, -2.93)])));
        client.push(Err(FetchError::HttpError("connection reset".to_string())));
        let (scheduler, layer) = scheduler(client, RefreshConfig::default());

        assert!(scheduler.run_once().await.is_success());
        let generation = layer.generation();

        let outcome = scheduler.run_once().await;
        assert!(matches!(outcome, CycleOutcome::Failed { .. }));
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.generation(), generation);

        let status = scheduler.status().snapshot();
        assert_eq!(status.cycles_failed, 1);
        assert!(status.is_degraded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_cycle_runs_immediately_then_every_interval() {
        let client = Arc::new(ScriptedClient::default());
        let (scheduler, _layer) = scheduler(client.clone(), RefreshConfig::from_millis(1_000));
        let cancel = CancellationToken::new();
        let handle = scheduler.start(cancel.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(client.calls(), 1);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(client.calls(), 2);

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert_eq!(client.calls(), 4);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_loop() {
        let client = Arc::new(ScriptedClient::default());
        let (scheduler, _layer) = scheduler(
            client.clone(),
            RefreshConfig::from_millis(1_000).with_overlap(OverlapPolicy::Chained),
        );
        let cancel = CancellationToken::new();
        let handle = scheduler.start(cancel.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
        handle.await.unwrap();

        let calls = client.calls();
        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(client.calls(), calls);
        assert!(scheduler.status().snapshot().stopped);
    }
}
