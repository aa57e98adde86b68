//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Waveform simulation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_sweep_width")]
    pub sweep_width: f64,

    #[serde(default = "default_sweep_height")]
    pub sweep_height: f64,

    #[serde(default = "default_sweep_speed")]
    pub sweep_speed: f64,

    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    #[serde(default = "default_step_length")]
    pub step_length_m: f64,

    /// Fixed seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

fn default_sweep_width() -> f64 {
    800.0
}

fn default_sweep_height() -> f64 {
    400.0
}

fn default_sweep_speed() -> f64 {
    0.8
}

fn default_buffer_size() -> usize {
    300
}

fn default_step_length() -> f64 {
    0.75
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sweep_width: default_sweep_width(),
            sweep_height: default_sweep_height(),
            sweep_speed: default_sweep_speed(),
            buffer_size: default_buffer_size(),
            step_length_m: default_step_length(),
            seed: None,
        }
    }
}

/// Telemetry feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_device_url")]
    pub base_url: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_feed_timeout")]
    pub request_timeout_ms: u64,
}

fn default_device_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_feed_timeout() -> u64 {
    1000
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_device_url(),
            poll_interval_ms: default_poll_interval(),
            request_timeout_ms: default_feed_timeout(),
        }
    }
}

/// Remote analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_device_url")]
    pub base_url: String,

    #[serde(default = "default_analysis_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_age")]
    pub default_age: u32,
}

fn default_analysis_timeout() -> u64 {
    5000
}

fn default_age() -> u32 {
    25
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: default_device_url(),
            request_timeout_ms: default_analysis_timeout(),
            default_age: default_age(),
        }
    }
}

/// Device API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_reading_interval")]
    pub reading_interval_ms: u64,

    #[serde(default = "default_server_age")]
    pub default_age: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_reading_interval() -> u64 {
    1000
}

fn default_server_age() -> u32 {
    30
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            reading_interval_ms: default_reading_interval(),
            default_age: default_server_age(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub output_dir: String,
}

fn default_export_dir() -> String {
    "./exports".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_export_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            PathBuf::from("./vitalscope.toml"),
            PathBuf::from("./config.toml"),
        ];

        for path in &config_paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Feed overrides
        if let Ok(url) = std::env::var("VITALSCOPE_DEVICE_URL") {
            self.feed.base_url = url.clone();
            self.analysis.base_url = url;
        }
        if let Ok(interval) = std::env::var("VITALSCOPE_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.feed.poll_interval_ms = ms;
            }
        }

        // Device server overrides
        if let Ok(host) = std::env::var("VITALSCOPE_DEVICE_HOST") {
            self.device.host = host;
        }
        if let Ok(port) = std::env::var("VITALSCOPE_DEVICE_PORT") {
            if let Ok(p) = port.parse() {
                self.device.port = p;
            }
        }

        // Simulation overrides
        if let Ok(seed) = std::env::var("VITALSCOPE_SEED") {
            if let Ok(s) = seed.parse() {
                self.simulation.seed = Some(s);
            }
        }

        // Export overrides
        if let Ok(dir) = std::env::var("VITALSCOPE_EXPORT_DIR") {
            self.export.output_dir = dir;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("VITALSCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("VITALSCOPE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            feed: FeedConfig::default(),
            analysis: AnalysisConfig::default(),
            device: DeviceConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Install the global tracing subscriber per the logging config.
///
/// `RUST_LOG` takes precedence over the configured level. The format
/// selects the pretty or JSON fmt layer; an optional file path appends
/// instead of writing to stderr. Calling this again after a subscriber
/// is installed is a no-op.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("vitalscope={}", config.level).into());

    let writer = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ConfigError::Io {
                    path: PathBuf::from(path),
                    error: e.to_string(),
                })?;
            Some(std::sync::Arc::new(file))
        }
        None => None,
    };

    let fmt_layer: Box<dyn Layer<_> + Send + Sync> = match (config.format.as_str(), writer) {
        ("json", Some(file)) => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(file)
            .boxed(),
        ("json", None) => tracing_subscriber::fmt::layer().json().boxed(),
        (_, Some(file)) => tracing_subscriber::fmt::layer().with_writer(file).boxed(),
        (_, None) => tracing_subscriber::fmt::layer().boxed(),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# VitalScope Configuration
#
# Environment variables override these settings:
# - VITALSCOPE_DEVICE_URL
# - VITALSCOPE_POLL_INTERVAL_MS
# - VITALSCOPE_DEVICE_HOST
# - VITALSCOPE_DEVICE_PORT
# - VITALSCOPE_SEED
# - VITALSCOPE_EXPORT_DIR
# - VITALSCOPE_LOG_LEVEL
# - VITALSCOPE_LOG_FORMAT

[simulation]
# Sweep surface size in pixels
sweep_width = 800.0
sweep_height = 400.0

# Scroll and phase speed multiplier
sweep_speed = 0.8

# Bounded sample history capacity
buffer_size = 300

# Average step length in meters for distance estimates
step_length_m = 0.75

# Uncomment for reproducible runs
# seed = 42

[feed]
# Device service base URL
base_url = "http://localhost:5000"

# Poll interval in milliseconds
poll_interval_ms = 5

# Per-request timeout in milliseconds
request_timeout_ms = 1000

[analysis]
# Analysis service base URL
base_url = "http://localhost:5000"

# Per-request timeout in milliseconds
request_timeout_ms = 5000

# Age sent when no profile is configured
default_age = 25

[device]
# Device API server bind address
host = "0.0.0.0"
port = 5000

# Interval between simulated readings (ms)
reading_interval_ms = 1000

# Age assumed for /analyze requests without one
default_age = 30

[export]
# Directory for CSV and snapshot exports
output_dir = "./exports"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/vitalscope/vitalscope.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.simulation.buffer_size, 300);
        assert_eq!(config.feed.poll_interval_ms, 5);
        assert_eq!(config.device.port, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [feed]
            base_url = "http://192.168.1.50:5000"

            [simulation]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.feed.base_url, "http://192.168.1.50:5000");
        assert_eq!(config.feed.poll_interval_ms, 5);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.sweep_speed, 0.8);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.device.reading_interval_ms, 1000);
        assert_eq!(config.export.output_dir, "./exports");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = Config::load(Path::new("/nonexistent/vitalscope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_init_tracing_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitalscope.log");

        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
            file: Some(path.to_string_lossy().into_owned()),
        };

        init_tracing(&config).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_init_tracing_rejects_unwritable_file() {
        let config = LoggingConfig {
            file: Some("/nonexistent/dir/vitalscope.log".to_string()),
            ..LoggingConfig::default()
        };

        let err = init_tracing(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
