//! ONNX Runtime backend for a scikit-learn attrition classifier.
//!
//! Expects a model exported with `skl2onnx` and `zipmap=False`: one float32
//! input of shape `[N, 6]` in [`FEATURE_NAMES`] order, and a `probabilities`
//! output of shape `[N, 2]`.
//!
//! [`FEATURE_NAMES`]: attrition_core::FEATURE_NAMES

use std::path::Path;
use std::sync::Mutex;

use attrition_core::{FEATURE_NAMES, PredictionInput};
use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use crate::RiskModel;

const PROBABILITIES_OUTPUT: &str = "probabilities";

/// Attrition classifier running in ONNX Runtime.
///
/// `Session::run` needs exclusive access, so the session sits behind a mutex
/// and the model can still be shared by reference.
pub struct OnnxModel {
    session: Mutex<Session>,
    input_name: String,
    output_index: usize,
}

impl OnnxModel {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        anyhow::ensure!(path.exists(), "model file not found: {path:?}");

        let session = Session::builder()?.commit_from_file(path)?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("model {path:?} declares no inputs"))?;

        // Prefer the named probability tensor; fall back to the last output.
        let outputs = session.outputs();
        anyhow::ensure!(!outputs.is_empty(), "model {path:?} declares no outputs");
        let output_index = outputs
            .iter()
            .position(|o| o.name() == PROBABILITIES_OUTPUT)
            .unwrap_or(outputs.len() - 1);

        info!(
            model = %path.display(),
            input = %input_name,
            output_index,
            "loaded onnx risk model"
        );
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_index,
        })
    }
}

impl RiskModel for OnnxModel {
    fn name(&self) -> &str {
        "onnx"
    }

    fn predict_proba(&self, input: &PredictionInput) -> anyhow::Result<[f64; 2]> {
        let features = input.features();
        let shape = [1i64, FEATURE_NAMES.len() as i64];
        let tensor = Tensor::from_array((shape, features.to_vec().into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("onnx session mutex poisoned: {e}"))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => tensor])?;

        let (output_shape, data) = outputs[self.output_index].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            *dims == [1, 2],
            "unexpected probability shape {dims:?}, expected [1, 2]"
        );

        Ok([data[0] as f64, data[1] as f64])
    }
}
