//! Three-level bucketing of a predicted attrition probability.
//!
//! The bands are half-open on the left so every probability lands in exactly
//! one level: `(0.65, 1]` High, `(0.4, 0.65]` Medium, `[0, 0.4]` Low.

use serde::Serialize;

pub const HIGH_THRESHOLD: f64 = 0.65;
pub const MEDIUM_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

const HEADLINES: [(RiskLevel, &str); 3] = [
    (
        RiskLevel::High,
        "**High Risk:** Employee likely to leave. Recommended Actions:",
    ),
    (
        RiskLevel::Medium,
        "**Medium Risk:** Moderate likelihood of leaving. Recommended Actions:",
    ),
    (
        RiskLevel::Low,
        "**Low Risk:** Employee stable. Recommended Actions:",
    ),
];

const HIGH_ACTIONS: &[&str] = &[
    "Reduce overtime and improve work-life balance.",
    "Offer recognition or financial incentives.",
    "Provide career growth opportunities.",
];

const MEDIUM_ACTIONS: &[&str] = &[
    "Monitor job satisfaction and engagement.",
    "Review compensation and workload.",
];

const LOW_ACTIONS: &[&str] = &["Maintain positive work environment and recognition programs."];

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Banner shown above the recommendation list.
    pub fn headline(&self) -> &'static str {
        HEADLINES
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, text)| *text)
            .unwrap_or_default()
    }

    /// Recommended retention actions for this level.
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::High => HIGH_ACTIONS,
            Self::Medium => MEDIUM_ACTIONS,
            Self::Low => LOW_ACTIONS,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a probability to its risk level.
pub fn classify(probability: f64) -> RiskLevel {
    if probability > HIGH_THRESHOLD {
        RiskLevel::High
    } else if probability > MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// A model probability together with its derived level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub level: RiskLevel,
}

impl RiskAssessment {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            level: classify(probability),
        }
    }

    /// Progress-bar value in 0..=100.
    pub fn progress(&self) -> u8 {
        (self.probability * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
