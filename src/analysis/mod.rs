//! Heart-risk analysis
//!
//! The classification path tries the remote service first and falls
//! back to a local random classification when anything goes wrong.
//! [`classify`] is the terminal handler: it cannot fail.

pub mod client;
pub mod risk;
pub mod scoring;

pub use client::{AnalysisClient, AnalysisConfig, AnalysisError, RemoteAnalysis};
pub use risk::{fallback_assessment, RiskAssessment, RiskCategory, FALLBACK_MARKER};
pub use scoring::{score, ScoredAnalysis, VitalsSnapshot};

use rand::Rng;

/// Classify via the remote service, degrading to the local fallback on
/// any failure (network error, non-2xx status, malformed payload).
pub async fn classify<R: Rng + ?Sized>(client: &AnalysisClient, rng: &mut R) -> RiskAssessment {
    match client.analyze().await {
        Ok(remote) => RiskAssessment {
            category: remote.category,
            message: remote.message,
            risk_score: remote.risk_score,
            confidence: remote.confidence,
            fallback: false,
        },
        Err(e) => {
            tracing::warn!(error = %e, "remote analysis failed, using local fallback");
            fallback_assessment(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_classify_falls_back_on_unreachable_service() {
        // Port 9 is discard; nothing is listening there.
        let client = AnalysisClient::new(AnalysisConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 200,
            default_age: 25,
        })
        .unwrap();

        let mut rng = StdRng::seed_from_u64(51);
        let assessment = classify(&client, &mut rng).await;

        assert!(assessment.fallback);
        assert!(assessment.message.ends_with(FALLBACK_MARKER));
        assert!(RiskCategory::all().contains(&assessment.category));
    }
}
