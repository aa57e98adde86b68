//! Data Route
//!
//! - GET /data - Latest simulated sensor reading

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::sim::DeviceReading;

/// GET /data
///
/// Serve the most recent reading published by the background updater.
pub async fn latest_reading(State(state): State<Arc<AppState>>) -> Json<DeviceReading> {
    Json(*state.latest.read().await)
}
