//! Heuristic risk scoring
//!
//! Local scorer behind the device API's `/analyze` endpoint. Scores
//! heart rate against the age-derived maximum plus temperature
//! extremes, then maps the points onto the four risk buckets.

use rand::Rng;
use serde::Serialize;

use super::risk::RiskCategory;

/// Inputs to the scorer.
#[derive(Debug, Clone, Copy)]
pub struct VitalsSnapshot {
    pub age: u32,
    pub heart_rate: f64,
    pub temperature: f64,
}

/// Scored analysis, serialized into the `/analyze` response.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredAnalysis {
    pub category: String,
    pub message: String,
    pub risk_score: u8,
    pub confidence: f64,
    pub heart_rate: f64,
    pub max_hr: f64,
    pub temperature: f64,
}

/// Age-derived maximum heart rate.
fn max_heart_rate(age: u32) -> f64 {
    220.0 - age as f64
}

/// Risk points for a snapshot.
fn risk_points(snapshot: &VitalsSnapshot) -> u8 {
    let max_hr = max_heart_rate(snapshot.age);
    let mut points = 0u8;

    if snapshot.heart_rate > max_hr * 0.9 {
        points += 3;
    } else if snapshot.heart_rate > max_hr * 0.8 {
        points += 2;
    } else if snapshot.heart_rate > max_hr * 0.7 {
        points += 1;
    }

    if snapshot.temperature > 37.5 {
        points += 2;
    } else if snapshot.temperature < 35.0 {
        points += 1;
    }

    points
}

/// Bucket for a point total: >=5 High, >=3 Moderate, >=1 Low.
fn category_for(points: u8) -> RiskCategory {
    match points {
        p if p >= 5 => RiskCategory::High,
        p if p >= 3 => RiskCategory::Moderate,
        p if p >= 1 => RiskCategory::Low,
        _ => RiskCategory::Healthy,
    }
}

/// Score a snapshot, picking one of the bucket's canned messages.
pub fn score<R: Rng + ?Sized>(snapshot: VitalsSnapshot, rng: &mut R) -> ScoredAnalysis {
    let points = risk_points(&snapshot);
    let category = category_for(points);
    let messages = category.messages();
    let message = messages[rng.gen_range(0..messages.len())];

    // Deterministic stand-in for the model's probability output.
    let confidence = (0.55 + 0.05 * points as f64).min(0.95);

    ScoredAnalysis {
        category: category.name().to_string(),
        message: message.to_string(),
        risk_score: points,
        confidence,
        heart_rate: snapshot.heart_rate,
        max_hr: max_heart_rate(snapshot.age),
        temperature: snapshot.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot(age: u32, heart_rate: f64, temperature: f64) -> VitalsSnapshot {
        VitalsSnapshot {
            age,
            heart_rate,
            temperature,
        }
    }

    #[test]
    fn test_resting_heart_is_healthy() {
        // max_hr for 30 is 190; 70 BPM is well under 70% of it.
        assert_eq!(risk_points(&snapshot(30, 70.0, 36.5)), 0);
        assert_eq!(category_for(0), RiskCategory::Healthy);
    }

    #[test]
    fn test_heart_rate_bands() {
        // max_hr = 190 for age 30: bands at 133, 152, 171.
        assert_eq!(risk_points(&snapshot(30, 140.0, 36.5)), 1);
        assert_eq!(risk_points(&snapshot(30, 160.0, 36.5)), 2);
        assert_eq!(risk_points(&snapshot(30, 180.0, 36.5)), 3);
    }

    #[test]
    fn test_temperature_extremes() {
        assert_eq!(risk_points(&snapshot(30, 70.0, 38.0)), 2);
        assert_eq!(risk_points(&snapshot(30, 70.0, 34.5)), 1);
    }

    #[test]
    fn test_combined_extremes_reach_high() {
        // Near-max HR plus fever: 3 + 2 = 5 points.
        let points = risk_points(&snapshot(30, 180.0, 38.0));
        assert_eq!(points, 5);
        assert_eq!(category_for(points), RiskCategory::High);
    }

    #[test]
    fn test_scored_message_comes_from_bucket() {
        let mut rng = StdRng::seed_from_u64(41);
        let analysis = score(snapshot(30, 160.0, 36.5), &mut rng);

        assert_eq!(analysis.category, "Low Risk");
        assert!(RiskCategory::Low
            .messages()
            .contains(&analysis.message.as_str()));
        assert!(analysis.confidence > 0.5 && analysis.confidence <= 0.95);
    }
}
