//! VitalScope Monitor
//!
//! Headless ECG monitor: polls the device feed, runs the waveform and
//! vitals simulation, requests risk analysis, and exports the session
//! on exit.
//!
//! Run with: cargo run --bin vitalscope

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vitalscope::analysis::{classify, AnalysisClient, AnalysisConfig};
use vitalscope::config::{init_tracing, Config};
use vitalscope::export::{export_history, export_snapshot, SnapshotStyle};
use vitalscope::feed::{FeedClient, FeedConfig, FeedPoller};
use vitalscope::sim::{
    Monitor, MonitorSettings, NullSurface, SharedSink, SweepSettings, TraceSink,
    STEP_INTERVAL_SECS,
};

/// Frame pacing for the sweep, roughly 60 FPS.
const FRAME_INTERVAL_MS: u64 = 16;
/// Vitals jitter cadence.
const VITALS_INTERVAL_SECS: u64 = 1;
/// Risk analysis cadence.
const ANALYSIS_INTERVAL_SECS: u64 = 30;

#[derive(Parser)]
#[command(name = "vitalscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Simulated ECG monitor with live device telemetry")]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device service URL override
    #[arg(long)]
    device_url: Option<String>,

    /// Fixed RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run for this many seconds then exit; runs until Ctrl+C otherwise
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Directory for CSV and snapshot exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Subject age sent with analysis requests
    #[arg(long)]
    age: Option<u32>,

    /// Skip the CSV and snapshot exports on exit
    #[arg(long)]
    no_export: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.device_url {
        config.feed.base_url = url.clone();
        config.analysis.base_url = url.clone();
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(age) = cli.age {
        config.analysis.default_age = age;
    }

    init_tracing(&config.logging)?;
    tracing::info!("VitalScope monitor v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Device feed: {}", config.feed.base_url);

    // Simulation state behind one lock; every periodic task goes
    // through the monitor's tick methods.
    let sink: SharedSink = Arc::new(Mutex::new(TraceSink::default()));
    let settings = MonitorSettings {
        sweep: SweepSettings {
            width: config.simulation.sweep_width,
            height: config.simulation.sweep_height,
            speed: config.simulation.sweep_speed,
            ..SweepSettings::default()
        },
        buffer_size: config.simulation.buffer_size,
        step_length_m: config.simulation.step_length_m,
    };
    let monitor = Arc::new(Mutex::new(Monitor::new(
        settings,
        sink,
        config.simulation.seed,
    )));

    // Feed poller
    let feed_client = FeedClient::new(FeedConfig {
        base_url: config.feed.base_url.clone(),
        poll_interval_ms: config.feed.poll_interval_ms,
        request_timeout_ms: config.feed.request_timeout_ms,
    })?;
    let poller_handle = FeedPoller::new(feed_client, Arc::clone(&monitor)).start();

    // Frame, vitals and step tasks
    let frame_handle = spawn_tick_task(
        Arc::clone(&monitor),
        Duration::from_millis(FRAME_INTERVAL_MS),
        |monitor| {
            let mut surface = NullSurface;
            monitor.frame_tick(&mut surface);
        },
    );
    let vitals_handle = spawn_tick_task(
        Arc::clone(&monitor),
        Duration::from_secs(VITALS_INTERVAL_SECS),
        Monitor::vitals_tick,
    );
    let step_handle = spawn_tick_task(
        Arc::clone(&monitor),
        Duration::from_secs(STEP_INTERVAL_SECS),
        Monitor::step_tick,
    );

    // Periodic risk analysis, remote first with local fallback
    let analysis_client = AnalysisClient::new(AnalysisConfig {
        base_url: config.analysis.base_url.clone(),
        request_timeout_ms: config.analysis.request_timeout_ms,
        default_age: config.analysis.default_age,
    })?;
    let analysis_handle = spawn_analysis_task(
        analysis_client,
        Arc::clone(&monitor),
        config.simulation.seed,
    );

    // Run until the deadline or Ctrl+C
    match cli.duration_secs {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                    tracing::info!("Run duration elapsed");
                }
                result = tokio::signal::ctrl_c() => {
                    result?;
                    tracing::info!("Interrupted");
                }
            }
        }
        None => {
            tokio::signal::ctrl_c().await?;
            tracing::info!("Interrupted");
        }
    }

    poller_handle.abort();
    frame_handle.abort();
    vitals_handle.abort();
    step_handle.abort();
    analysis_handle.abort();

    if !cli.no_export {
        let export_dir = cli
            .export_dir
            .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));
        export_session(&monitor, &export_dir)?;
    }

    tracing::info!("VitalScope monitor stopped");
    Ok(())
}

/// Spawn a fixed-interval task calling one monitor tick method.
fn spawn_tick_task(
    monitor: Arc<Mutex<Monitor>>,
    period: Duration,
    tick: impl Fn(&mut Monitor) + Send + 'static,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if let Ok(mut monitor) = monitor.lock() {
                tick(&mut monitor);
            }
        }
    })
}

/// Spawn the periodic risk analysis task.
fn spawn_analysis_task(
    client: AnalysisClient,
    monitor: Arc<Mutex<Monitor>>,
    seed: Option<u64>,
) -> tokio::task::JoinHandle<()> {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    tokio::spawn(async move {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(2)),
            None => StdRng::from_entropy(),
        };
        let mut interval =
            tokio::time::interval(Duration::from_secs(ANALYSIS_INTERVAL_SECS));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let assessment = classify(&client, &mut rng).await;
            tracing::info!(
                category = %assessment.category.name(),
                fallback = assessment.fallback,
                "Risk assessment: {}",
                assessment.message
            );
            if let Ok(mut monitor) = monitor.lock() {
                monitor.show_analysis(assessment.category.name(), &assessment.message);
            }
        }
    })
}

/// Write the CSV history and PNG snapshot for this session.
fn export_session(monitor: &Arc<Mutex<Monitor>>, dir: &PathBuf) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {:?}", dir))?;

    let monitor = monitor
        .lock()
        .map_err(|_| anyhow::anyhow!("monitor state lock poisoned"))?;

    let csv_path = export_history(monitor.history(), dir).context("exporting CSV history")?;
    tracing::info!("Exported {} samples to {:?}", monitor.history().len(), csv_path);

    let png_path = export_snapshot(&monitor, &SnapshotStyle::default(), dir)
        .context("exporting snapshot")?;
    tracing::info!("Exported snapshot to {:?}", png_path);

    Ok(())
}
