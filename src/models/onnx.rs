//! ONNX classifier scored through ONNX Runtime

use crate::feature_extractor::{FeatureRow, FEATURE_COUNT};
use crate::models::scorer::Scorer;
use anyhow::{anyhow, Context, Result};
use ort::memory::Allocator;
use ort::session::{builder::GraphOptimizationLevel, Session, SessionOutputs};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, Tensor};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Loaded ONNX classifier.
///
/// The first graph input takes a `[1, 10]` float tensor in `FEATURE_COLUMNS` order.
pub struct OnnxScorer {
    name: String,
    /// Running a session needs `&mut`; the lock is held for one run only
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxScorer {
    /// Load a model file. ONNX Runtime must already be initialised.
    pub fn from_file<P: AsRef<Path>>(path: P, name: &str, intra_threads: usize) -> Result<Self> {
        let path = path.as_ref();

        info!(model = %name, path = %path.display(), threads = intra_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(intra_threads)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {:?}", path))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| anyhow!("Model {:?} declares no inputs", path))?;

        // sklearn-onnx classifiers emit "label" and "probabilities"/"output_probability"
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| anyhow!("Model {:?} declares no outputs", path))?;

        info!(
            model = %name,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(Self {
            name: name.to_string(),
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }

    /// Pull the no-show probability out of the session outputs.
    ///
    /// Handles probability tensors and seq(map(int64, float)) outputs.
    fn extract_probability(&self, outputs: &SessionOutputs) -> Result<f64> {
        if let Some(output) = outputs.get(&self.output_name) {
            if let Some(prob) = self.try_extract(output) {
                return Ok(prob);
            }
        }

        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }
            if let Some(prob) = self.try_extract(&output) {
                debug!(model = %self.name, output = %name, prob = prob, "Extracted from fallback output");
                return Ok(prob);
            }
        }

        Err(anyhow!(
            "Model {} produced no readable probability output",
            self.name
        ))
    }

    fn try_extract(&self, output: &DynValue) -> Option<f64> {
        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            let dims: Vec<i64> = shape.iter().copied().collect();
            return positive_from_tensor(&dims, data);
        }

        let dtype = output.dtype();
        if DynSequenceValueType::can_downcast(&dtype) {
            return self.extract_from_sequence_map(output).ok();
        }

        None
    }

    /// seq(map(int64, float)) as produced by zipmap-enabled exports
    fn extract_from_sequence_map(&self, output: &DynValue) -> Result<f64> {
        let allocator = Allocator::default();

        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|e| anyhow!("Failed to downcast to sequence: {}", e))?;

        let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;
        let first = maps.first().ok_or_else(|| anyhow!("Empty sequence"))?;
        let kv_pairs = first.try_extract_key_values::<i64, f32>()?;

        if let Some((_, prob)) = kv_pairs.iter().find(|(class_id, _)| *class_id == 1) {
            return Ok(*prob as f64);
        }
        if let Some((_, prob)) = kv_pairs.iter().find(|(class_id, _)| *class_id == 0) {
            return Ok(1.0 - *prob as f64);
        }

        Err(anyhow!("No class probability found in map"))
    }
}

/// Positive-class probability from a `[batch, classes]` or `[classes]` tensor
fn positive_from_tensor(dims: &[i64], data: &[f32]) -> Option<f64> {
    let classes = *dims.last()?;
    match classes {
        c if c >= 2 => data.get(1).map(|&p| p as f64),
        1 => data.first().map(|&p| p as f64),
        _ => None,
    }
}

impl Scorer for OnnxScorer {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<f64> {
        let shape = vec![1_i64, FEATURE_COUNT as i64];
        let input_tensor = Tensor::from_array((shape, row.as_slice().to_vec()))
            .context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow!("Lock error: {}", e))?;
        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        self.extract_probability(&outputs)
    }
}
