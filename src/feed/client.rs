//! Telemetry feed client
//!
//! Fetches the latest sensor reading from the device's `GET /data`
//! endpoint. Every field is optional and numeric-coercible: the device
//! firmware has been seen reporting numbers as strings.

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the device service (e.g. "http://localhost:5000").
    pub base_url: String,
    /// Poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            poll_interval_ms: 5,
            request_timeout_ms: 1000,
        }
    }
}

/// One polled reading. Missing or non-numeric fields come back as None
/// and are skipped by the display update.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct SensorReading {
    #[serde(default, deserialize_with = "numeric_coerce")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "numeric_coerce")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "numeric_coerce")]
    pub heart_rate: Option<f64>,
}

/// Accept a JSON number, a numeric string, or null.
fn numeric_coerce<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Client polling the device data endpoint.
pub struct FeedClient {
    client: Client,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(FeedError::Request)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// One fetch attempt. No retries; the poller just tries again on
    /// its next tick.
    pub async fn fetch(&self) -> Result<SensorReading, FeedError> {
        let url = format!("{}/data", self.config.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout
            } else if e.is_connect() {
                FeedError::Unavailable
            } else {
                FeedError::Request(e)
            }
        })?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))
    }
}

/// Errors from the feed fetch.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Device unreachable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed feed payload: {0}")]
    Malformed(String),
}
