//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::analysis::ScoredAnalysis;

/// Analysis request body for `POST /analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Subject age in years; the configured default applies when omitted
    #[serde(default)]
    pub age: Option<u32>,
}

/// Analysis response envelope
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Always true on the success path
    pub success: bool,
    /// The scored analysis
    pub analysis: ScoredAnalysis,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Package version
    pub version: String,
}
