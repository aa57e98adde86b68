//! VitalScope Device Server
//!
//! Stand-in for the hardware sensor: serves fresh simulated readings on
//! `GET /data` and scores them on `POST /analyze`.
//!
//! Run with: cargo run --bin vitalscope-device

use clap::Parser;
use std::path::PathBuf;

use vitalscope::api::{serve, ApiConfig, AppState};
use vitalscope::config::{init_tracing, Config};

#[derive(Parser)]
#[command(name = "vitalscope-device")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Simulated sensor device API server")]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Fixed RNG seed for reproducible readings
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = cli.host {
        config.device.host = host;
    }
    if let Some(port) = cli.port {
        config.device.port = port;
    }

    init_tracing(&config.logging)?;

    tracing::info!("Starting device server v{}", env!("CARGO_PKG_VERSION"));

    let api_config = ApiConfig {
        host: config.device.host.clone(),
        port: config.device.port,
        reading_interval_ms: config.device.reading_interval_ms,
        default_age: config.device.default_age,
    };
    let state = AppState::new(api_config.clone(), cli.seed);

    tracing::info!("Listening on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Device server stopped");
    Ok(())
}
