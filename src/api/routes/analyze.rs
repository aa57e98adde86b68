//! Analyze Route
//!
//! - POST /analyze - Score the latest reading against an age profile

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::analysis::{score, VitalsSnapshot};
use crate::api::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /analyze
///
/// Scores the most recent reading. The body may carry an `age`; the
/// configured default applies otherwise.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let age = request.age.unwrap_or(state.config.default_age);
    if !(1..=120).contains(&age) {
        return Err(ApiError::Validation(format!(
            "age must be between 1 and 120, got {}",
            age
        )));
    }

    let reading = *state.latest.read().await;
    let snapshot = VitalsSnapshot {
        age,
        heart_rate: reading.heart_rate as f64,
        temperature: reading.temperature,
    };

    let mut rng = state.rng.lock().await;
    let analysis = score(snapshot, &mut *rng);

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
