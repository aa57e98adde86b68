//! Risk categories and the local fallback classifier
//!
//! Four fixed buckets with three canned messages each. The fallback
//! path draws a uniform bucket and message; it is the terminal error
//! handler for the classification path and can never fail.

use rand::Rng;

/// Marker appended to fallback messages.
pub const FALLBACK_MARKER: &str = " (Fallback mode)";

/// The four recognized risk buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    High,
    Moderate,
    Low,
    Healthy,
}

impl RiskCategory {
    /// Display name, as shown in the risk panel.
    pub fn name(&self) -> &'static str {
        match self {
            RiskCategory::High => "High Risk",
            RiskCategory::Moderate => "Moderate Risk",
            RiskCategory::Low => "Low Risk",
            RiskCategory::Healthy => "Healthy Heart",
        }
    }

    /// Style slug used by display sinks.
    pub fn slug(&self) -> &'static str {
        match self {
            RiskCategory::High => "high-risk",
            RiskCategory::Moderate => "moderate-risk",
            RiskCategory::Low => "low-risk",
            RiskCategory::Healthy => "healthy",
        }
    }

    /// Map a remote category label; unknown labels default to Healthy.
    pub fn from_label(label: &str) -> Self {
        match label {
            "High Risk" => RiskCategory::High,
            "Moderate Risk" => RiskCategory::Moderate,
            "Low Risk" => RiskCategory::Low,
            _ => RiskCategory::Healthy,
        }
    }

    /// Map a fallback draw in `[0, 3]` to a bucket.
    pub fn from_draw(draw: u8) -> Self {
        match draw {
            3 => RiskCategory::High,
            2 => RiskCategory::Moderate,
            1 => RiskCategory::Low,
            _ => RiskCategory::Healthy,
        }
    }

    pub fn all() -> [RiskCategory; 4] {
        [
            RiskCategory::High,
            RiskCategory::Moderate,
            RiskCategory::Low,
            RiskCategory::Healthy,
        ]
    }

    /// The three canned alert messages for this bucket.
    pub fn messages(&self) -> [&'static str; 3] {
        match self {
            RiskCategory::High => [
                "🚨 Seek immediate medical attention! Signs of heart strain detected!",
                "⚠️ Warning: Your heart is under extreme stress. Stop running immediately!",
                "🚨 High risk of heart attack! Consult a cardiologist before running again!",
            ],
            RiskCategory::Moderate => [
                "⚠️ Be cautious! Your heart is working harder than normal.",
                "🔴 Slow down! Your heart rate is beyond safe running limits.",
                "⚠️ Moderate risk detected. Consider consulting a doctor for a checkup.",
            ],
            RiskCategory::Low => [
                "✅ You're doing fine, but stay aware of your limits.",
                "📉 Maintain a steady pace to keep your heart in optimal condition.",
                "✅ Slight risk detected. Keep training smartly and monitor your stats.",
            ],
            RiskCategory::Healthy => [
                "💪 Excellent heart condition! Keep pushing forward!",
                "🔥 You're in great shape! Maintain this pace for peak performance.",
                "💙 No heart concerns detected. Keep running strong and stay hydrated!",
            ],
        }
    }
}

/// Outcome of the classification path, remote or fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub category: RiskCategory,
    pub message: String,
    /// Present only when the remote analysis supplied them.
    pub risk_score: Option<f64>,
    pub confidence: Option<f64>,
    /// True when the result came from the local fallback.
    pub fallback: bool,
}

/// Local fallback classification: uniform bucket, uniform canned
/// message, fallback marker appended. Infallible by construction.
pub fn fallback_assessment<R: Rng + ?Sized>(rng: &mut R) -> RiskAssessment {
    let category = RiskCategory::from_draw(rng.gen_range(0..4));
    let messages = category.messages();
    let message = messages[rng.gen_range(0..messages.len())];

    RiskAssessment {
        category,
        message: format!("{}{}", message, FALLBACK_MARKER),
        risk_score: None,
        confidence: None,
        fallback: true,
    }
}
