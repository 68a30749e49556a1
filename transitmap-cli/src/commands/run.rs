//! Run command - poll the feed and display vehicle markers until stopped.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::info;
use transitmap::config::{ConfigFile, MIN_REFRESH_INTERVAL_MS};
use transitmap::feed::{FeedClient, FeedFetcher, HttpFeedClient};
use transitmap::map::{MapContext, Region, SharedMarkerLayer};
use transitmap::refresh::{OverlapPolicy, RefreshScheduler};

use super::common::FeedArgs;
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app::{self, RefreshSession};

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Refresh interval in milliseconds (overrides [refresh] interval_ms)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Overlap policy: concurrent or chained (overrides [refresh] overlap)
    #[arg(long)]
    pub overlap: Option<OverlapPolicy>,

    /// Only show vehicles inside min_lat,min_lon,max_lat,max_lon
    #[arg(long, allow_hyphen_values = true)]
    pub region: Option<Region>,

    /// Print status lines instead of the dashboard
    #[arg(long)]
    pub no_tui: bool,

    /// Enable debug-level logging
    #[arg(long)]
    pub debug: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the config file.
    fn apply(&self, config: &mut ConfigFile) -> Result<(), CliError> {
        self.feed.apply(config)?;

        if let Some(interval_ms) = self.interval_ms {
            if interval_ms < MIN_REFRESH_INTERVAL_MS {
                return Err(CliError::Config(format!(
                    "--interval-ms must be at least {} (got {})",
                    MIN_REFRESH_INTERVAL_MS, interval_ms
                )));
            }
            config.refresh.interval_ms = interval_ms;
        }
        if let Some(overlap) = self.overlap {
            config.refresh.overlap = overlap;
        }
        if let Some(region) = self.region {
            config.map.region = Some(region);
        }
        Ok(())
    }
}

/// Run the refresh loop with the dashboard or headless output.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let use_tui = !args.no_tui && atty::is(atty::Stream::Stdout);

    let runner = CliRunner::with_stdout_logging(args.debug, !use_tui)?;
    runner.log_startup("run");

    let mut config = runner.config().clone();
    args.apply(&mut config)?;

    let client = HttpFeedClient::new(config.feed_config())?;
    let fetcher = FeedFetcher::new(client).with_region(config.map.region);
    let layer = SharedMarkerLayer::new();
    let view = config.map_view();
    let context = MapContext::new(view, layer.clone());
    let scheduler = RefreshScheduler::new(fetcher, context, config.refresh_config());

    info!(
        url = %config.feed.url,
        interval_ms = config.refresh.interval_ms,
        overlap = %config.refresh.overlap,
        region = ?config.map.region,
        "Starting refresh loop"
    );

    // Set up signal handler for graceful shutdown
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let session = RefreshSession {
        feed_url: config.feed.url.clone(),
        view,
        layer,
        status: scheduler.status(),
        shutdown,
    };

    let cancel = CancellationToken::new();
    let refresh_thread = spawn_refresh_thread(scheduler, cancel.clone())?;

    let result = if use_tui {
        tui_app::run_tui(&session)
    } else {
        tui_app::run_headless(&session)
    };

    // Stop the loop whether the display exited cleanly or not
    cancel.cancel();
    refresh_thread
        .join()
        .map_err(|_| CliError::Runtime(io::Error::other("refresh thread panicked")))?;
    result?;

    let snapshot = session.status.snapshot();
    info!(
        cycles = snapshot.cycles_started,
        succeeded = snapshot.cycles_succeeded,
        failed = snapshot.cycles_failed,
        "Refresh loop stopped"
    );

    println!();
    println!("{}", snapshot.summary_line());
    println!("Logs: {}", runner.log_path().display());
    Ok(())
}

/// Drive the scheduler on its own runtime thread until `cancel` fires.
fn spawn_refresh_thread<C: FeedClient + 'static>(
    scheduler: RefreshScheduler<C>,
    cancel: CancellationToken,
) -> Result<JoinHandle<()>, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    std::thread::Builder::new()
        .name("transitmap-refresh".to_string())
        .spawn(move || runtime.block_on(scheduler.run(cancel)))
        .map_err(CliError::Runtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use transitmap::feed::FeedFormat;

    fn args() -> RunArgs {
        RunArgs {
            feed: FeedArgs::default(),
            interval_ms: None,
            overlap: None,
            region: None,
            no_tui: true,
            debug: false,
        }
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let mut config = ConfigFile::default();
        let mut run_args = args();
        run_args.feed.format = Some(FeedFormat::Xml);
        run_args.interval_ms = Some(5_000);
        run_args.overlap = Some(OverlapPolicy::Chained);
        run_args.region = Some(Region::BIZKAIA);

        run_args.apply(&mut config).unwrap();

        assert_eq!(config.feed.format, FeedFormat::Xml);
        assert_eq!(config.refresh.interval_ms, 5_000);
        assert_eq!(config.refresh.overlap, OverlapPolicy::Chained);
        assert_eq!(config.map.region, Some(Region::BIZKAIA));
    }

    #[test]
    fn test_rejects_short_interval() {
        let mut config = ConfigFile::default();
        let mut run_args = args();
        run_args.interval_ms = Some(MIN_REFRESH_INTERVAL_MS - 1);

        assert!(matches!(
            run_args.apply(&mut config),
            Err(CliError::Config(_))
        ));
        assert_eq!(config.refresh.interval_ms, 15_000);
    }
}
