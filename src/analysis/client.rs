//! Remote analysis client
//!
//! HTTP client for the `POST /analyze` classification endpoint. A call
//! either succeeds or fails within its timeout; there is no retry, the
//! caller degrades to the local fallback instead.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::risk::RiskCategory;

/// Configuration for the analysis client.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Base URL of the analysis service (e.g. "http://localhost:5000").
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Age sent with the classification payload.
    pub default_age: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 5000,
            default_age: 25,
        }
    }
}

/// Client for the remote classification endpoint.
pub struct AnalysisClient {
    client: Client,
    config: AnalysisConfig,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    age: u32,
}

#[derive(Debug, Deserialize)]
struct AnalyzeEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    analysis: Option<AnalysisPayload>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    category: String,
    message: String,
    #[serde(default)]
    risk_score: Option<f64>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// A successful remote classification.
#[derive(Debug, Clone)]
pub struct RemoteAnalysis {
    pub category: RiskCategory,
    /// Message surfaced verbatim from the service.
    pub message: String,
    pub risk_score: Option<f64>,
    pub confidence: Option<f64>,
}

impl AnalysisClient {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(AnalysisError::Request)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Single classification attempt with the configured age.
    pub async fn analyze(&self) -> Result<RemoteAnalysis, AnalysisError> {
        self.analyze_age(self.config.default_age).await
    }

    /// Single classification attempt. No retries.
    pub async fn analyze_age(&self, age: u32) -> Result<RemoteAnalysis, AnalysisError> {
        let url = format!("{}/analyze", self.config.base_url);
        let body = AnalyzeRequest { age };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout
                } else if e.is_connect() {
                    AnalysisError::Unavailable
                } else {
                    AnalysisError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api { status, message });
        }

        let envelope: AnalyzeEnvelope = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        let payload = match (envelope.success, envelope.analysis) {
            (true, Some(payload)) => payload,
            _ => {
                return Err(AnalysisError::Api {
                    status: 200,
                    message: envelope.error.unwrap_or_else(|| "Analysis failed".to_string()),
                })
            }
        };

        Ok(RemoteAnalysis {
            category: RiskCategory::from_label(&payload.category),
            message: payload.message,
            risk_score: payload.risk_score,
            confidence: payload.confidence,
        })
    }
}

/// Errors from the remote classification call.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Analysis service unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Analysis API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed analysis payload: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.default_age, 25);
    }

    #[test]
    fn test_envelope_parses_success_shape() {
        let json = r#"{
            "success": true,
            "analysis": {
                "category": "Moderate Risk",
                "message": "be careful",
                "risk_score": 3,
                "confidence": 0.7
            }
        }"#;

        let envelope: AnalyzeEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let payload = envelope.analysis.unwrap();
        assert_eq!(payload.category, "Moderate Risk");
        assert_eq!(payload.risk_score, Some(3.0));
    }

    #[test]
    fn test_envelope_parses_error_shape() {
        let json = r#"{"success": false, "error": "boom"}"#;
        let envelope: AnalyzeEnvelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("boom"));
    }
}
