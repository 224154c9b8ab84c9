//! Logistic-regression risk model read from a JSON coefficient file.
//!
//! ```json
//! {
//!   "features": ["Age", "MonthlyIncome", "OverTime", "JobSatisfaction", "WorkLifeBalance", "YearsAtCompany"],
//!   "coefficients": [-0.03, -0.0001, 1.4, -0.3, -0.25, -0.05],
//!   "intercept": 1.1,
//!   "means": [36.9, 6502.9, 0.28, 2.7, 2.8, 7.0],
//!   "scales": [9.1, 4706.4, 0.45, 1.1, 0.7, 6.1]
//! }
//! ```
//!
//! `means`/`scales` are optional and apply standard scaling before the linear
//! term, matching a scaler + logistic regression pipeline.

use std::path::Path;

use anyhow::Context;
use attrition_core::{PredictionInput, hr};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::RiskModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub means: Option<Vec<f64>>,
    #[serde(default)]
    pub scales: Option<Vec<f64>>,
}

impl LogisticModel {
    /// Read and validate a coefficient file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading model file {}", path.display()))?;
        let model = Self::from_json(&text)
            .with_context(|| format!("parsing model file {}", path.display()))?;
        info!(model = %path.display(), "loaded logistic risk model");
        Ok(model)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let model: Self = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    /// Feature names must match the prediction input schema, in order.
    fn validate(&self) -> anyhow::Result<()> {
        let schema = hr::prediction_input_schema();
        let expected: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        anyhow::ensure!(
            self.features == expected,
            "feature order {:?} does not match expected {:?}",
            self.features,
            expected
        );

        let n = expected.len();
        anyhow::ensure!(
            self.coefficients.len() == n,
            "expected {n} coefficients, got {}",
            self.coefficients.len()
        );
        anyhow::ensure!(
            self.coefficients.iter().all(|c| c.is_finite()) && self.intercept.is_finite(),
            "coefficients must be finite"
        );

        if let Some(means) = &self.means {
            anyhow::ensure!(means.len() == n, "expected {n} means, got {}", means.len());
        }
        if let Some(scales) = &self.scales {
            anyhow::ensure!(scales.len() == n, "expected {n} scales, got {}", scales.len());
            anyhow::ensure!(
                scales.iter().all(|s| *s != 0.0 && s.is_finite()),
                "scales must be finite and non-zero"
            );
        }
        Ok(())
    }

    /// P(leave) for a raw feature vector.
    pub fn probability(&self, features: &[f32; 6]) -> f64 {
        let z: f64 = features
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mut x = x as f64;
                if let Some(means) = &self.means {
                    x -= means[i];
                }
                if let Some(scales) = &self.scales {
                    x /= scales[i];
                }
                x * self.coefficients[i]
            })
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }
}

impl RiskModel for LogisticModel {
    fn name(&self) -> &str {
        "logistic"
    }

    fn predict_proba(&self, input: &PredictionInput) -> anyhow::Result<[f64; 2]> {
        let leave = self.probability(&input.features());
        Ok([1.0 - leave, leave])
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURES: &str = r#"["Age", "MonthlyIncome", "OverTime", "JobSatisfaction", "WorkLifeBalance", "YearsAtCompany"]"#;

    fn model_json(coefficients: &str, intercept: f64) -> String {
        format!(
            r#"{{"features": {FEATURES}, "coefficients": {coefficients}, "intercept": {intercept}}}"#
        )
    }

    #[test]
    fn zero_model_is_a_coin_flip() {
        let model = LogisticModel::from_json(&model_json("[0, 0, 0, 0, 0, 0]", 0.0)).unwrap();
        let [stay, leave] = model.predict_proba(&PredictionInput::default()).unwrap();
        assert_eq!(leave, 0.5);
        assert!((stay + leave - 1.0).abs() < 1e-12);
    }

    #[test]
    fn overtime_raises_risk_with_positive_weight() {
        let model = LogisticModel::from_json(&model_json("[0, 0, 2.0, 0, 0, 0]", -1.0)).unwrap();
        let with = PredictionInput::new(30, 5_000, true, 3, 3, 5).unwrap();
        let without = PredictionInput::new(30, 5_000, false, 3, 3, 5).unwrap();
        let p_with = model.probability(&with.features());
        let p_without = model.probability(&without.features());
        assert!(p_with > p_without);
        assert!((p_with - sigmoid(1.0)).abs() < 1e-12);
    }

    #[test]
    fn standard_scaling_is_applied() {
        let json = format!(
            r#"{{"features": {FEATURES}, "coefficients": [1, 0, 0, 0, 0, 0], "intercept": 0,
                "means": [30, 0, 0, 0, 0, 0], "scales": [10, 1, 1, 1, 1, 1]}}"#
        );
        let model = LogisticModel::from_json(&json).unwrap();
        let input = PredictionInput::new(40, 5_000, false, 3, 3, 5).unwrap();
        assert!((model.probability(&input.features()) - sigmoid(1.0)).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_feature_order() {
        let json = r#"{"features": ["MonthlyIncome", "Age", "OverTime", "JobSatisfaction", "WorkLifeBalance", "YearsAtCompany"],
                       "coefficients": [0, 0, 0, 0, 0, 0], "intercept": 0}"#;
        let err = LogisticModel::from_json(json).unwrap_err();
        assert!(err.to_string().contains("feature order"));
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        assert!(LogisticModel::from_json(&model_json("[0, 0, 0]", 0.0)).is_err());
    }

    #[test]
    fn rejects_zero_scale() {
        let json = format!(
            r#"{{"features": {FEATURES}, "coefficients": [0, 0, 0, 0, 0, 0], "intercept": 0,
                "scales": [1, 0, 1, 1, 1, 1]}}"#
        );
        assert!(LogisticModel::from_json(&json).is_err());
    }

    #[test]
    fn load_reports_path_on_missing_file() {
        let err = LogisticModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/model.json"));
    }
}
