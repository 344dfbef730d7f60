//! Model artifact loader

use crate::models::logistic::LogisticScorer;
use crate::models::onnx::OnnxScorer;
use crate::models::scorer::Scorer;
use anyhow::{bail, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Loads the no-show classifier artifact once at startup.
///
/// The format is picked from the file extension: `.onnx` runs through
/// ONNX Runtime, `.json` is a logistic regression artifact.
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load the artifact at `path`. Any failure here is fatal for the caller.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<dyn Scorer>> {
        let path = path.as_ref();

        if !path.is_file() {
            bail!("Model artifact not found at {}", path.display());
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model")
            .to_string();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        let scorer: Arc<dyn Scorer> = match extension.as_deref() {
            Some("onnx") => {
                ort::init().commit()?;
                info!(onnx_threads = self.onnx_threads, "ONNX Runtime initialized");
                Arc::new(OnnxScorer::from_file(path, &name, self.onnx_threads)?)
            }
            Some("json") => {
                let scorer = LogisticScorer::from_file(path)?;
                info!(
                    model = %scorer.model_name,
                    path = %path.display(),
                    "Logistic model loaded successfully"
                );
                Arc::new(scorer)
            }
            other => bail!(
                "Unsupported model artifact {} (extension {:?}, expected .onnx or .json)",
                path.display(),
                other.unwrap_or_default()
            ),
        };

        Ok(scorer)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_extractor::{FeatureRow, FEATURE_COUNT};

    #[test]
    fn test_missing_artifact_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelLoader::new()
            .load(dir.path().join("no_show_model.onnx"))
            .err()
            .unwrap();

        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_unknown_extension_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_show_model.joblib");
        std::fs::write(&path, b"opaque").unwrap();

        let err = ModelLoader::new().load(&path).err().unwrap();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn test_load_logistic_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_show_model.json");
        let artifact = LogisticScorer::new("baseline", [0.0; FEATURE_COUNT], 0.0);
        std::fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();

        let scorer = ModelLoader::new().load(&path).unwrap();

        assert_eq!(scorer.name(), "baseline");
        let row = FeatureRow::new([0.0; FEATURE_COUNT]);
        assert_eq!(scorer.predict_proba(&row).unwrap(), 0.5);
    }

    #[test]
    fn test_corrupt_artifact_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_show_model.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(ModelLoader::new().load(&path).is_err());
    }
}
