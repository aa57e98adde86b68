//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};

use crate::sim::{DeviceReading, SensorSimulator};

/// Shared application state for all handlers
pub struct AppState {
    /// Most recent simulated reading, served by `GET /data`
    pub latest: RwLock<DeviceReading>,
    /// Reading generator, driven by the background updater
    pub simulator: Mutex<SensorSimulator>,
    /// Random source for the analysis scorer
    pub rng: Mutex<StdRng>,
    /// API configuration
    pub config: ApiConfig,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with a first reading already drawn, so `GET /data`
    /// never serves zeros.
    pub fn new(config: ApiConfig, seed: Option<u64>) -> Self {
        let mut simulator = SensorSimulator::new(seed);
        let first = simulator.next_reading();

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        Self {
            latest: RwLock::new(first),
            simulator: Mutex::new(simulator),
            rng: Mutex::new(rng),
            config,
            start_time: Instant::now(),
        }
    }

    /// Draw a fresh reading and publish it.
    pub async fn refresh_reading(&self) {
        let reading = self.simulator.lock().await.next_reading();
        *self.latest.write().await = reading;
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Interval between simulated readings in milliseconds
    pub reading_interval_ms: u64,
    /// Age assumed when `/analyze` requests omit one
    pub default_age: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            reading_interval_ms: 1_000,
            default_age: 30,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
