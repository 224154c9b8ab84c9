//! Risk inference: a pre-trained binary classifier behind the [`RiskModel`] trait.

mod logistic;
mod model;

pub use logistic::LogisticModel;
pub use model::{RiskModel, assess, load_model};

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
