//! ML model inference components

pub mod inference;
pub mod loader;
pub mod logistic;
pub mod onnx;
pub mod scorer;

pub use inference::{InferenceEngine, PredictError};
pub use loader::ModelLoader;
pub use logistic::LogisticScorer;
pub use onnx::OnnxScorer;
pub use scorer::Scorer;
