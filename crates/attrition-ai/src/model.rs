use std::path::Path;

use attrition_core::{PredictionInput, RiskAssessment};
use tracing::info;

use crate::LogisticModel;

/// A binary attrition classifier.
///
/// Loaded once at startup and shared read-only, so prediction takes `&self`.
pub trait RiskModel {
    /// Short description for logs and output.
    fn name(&self) -> &str;

    /// Class probabilities `[P(stay), P(leave)]` for one employee.
    fn predict_proba(&self, input: &PredictionInput) -> anyhow::Result<[f64; 2]>;
}

/// Run the model and bucket P(leave) into a risk level.
pub fn assess(model: &dyn RiskModel, input: &PredictionInput) -> anyhow::Result<RiskAssessment> {
    let [_, leave] = model.predict_proba(input)?;
    anyhow::ensure!(
        (0.0..=1.0).contains(&leave),
        "{} returned probability {leave} outside [0, 1]",
        model.name()
    );
    let assessment = RiskAssessment::from_probability(leave);
    info!(
        model = model.name(),
        probability = leave,
        level = assessment.level.as_str(),
        "assessed attrition risk"
    );
    Ok(assessment)
}

/// Load a model file, choosing the backend by extension.
///
/// - `.onnx`: scikit-learn classifier exported to ONNX (needs the `onnx` feature)
/// - `.json`: logistic-regression coefficients, see [`LogisticModel`]
pub fn load_model(path: &Path) -> anyhow::Result<Box<dyn RiskModel>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => Ok(Box::new(LogisticModel::load(path)?)),
        Some("onnx") => load_onnx(path),
        _ => anyhow::bail!(
            "unsupported model file {path:?}: expected a .onnx or .json extension"
        ),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> anyhow::Result<Box<dyn RiskModel>> {
    Ok(Box::new(crate::OnnxModel::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> anyhow::Result<Box<dyn RiskModel>> {
    anyhow::bail!("cannot load {path:?}: built without the `onnx` feature")
}
