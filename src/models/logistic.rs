//! Logistic regression artifact stored as JSON

use crate::feature_extractor::{FeatureRow, FEATURE_COLUMNS, FEATURE_COUNT};
use crate::models::scorer::Scorer;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Coefficients of a fitted logistic regression.
///
/// `feature_names` records the column order used at training time and must
/// match `FEATURE_COLUMNS` exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticScorer {
    pub model_name: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticScorer {
    pub fn new(model_name: impl Into<String>, coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            model_name: model_name.into(),
            feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            coefficients: coefficients.to_vec(),
            intercept,
        }
    }

    /// Read and check an artifact from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact {:?}", path))?;
        let scorer: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse model artifact {:?}", path))?;
        scorer.check_schema()?;
        Ok(scorer)
    }

    /// Reject artifacts trained on a different column layout
    pub fn check_schema(&self) -> Result<()> {
        ensure!(
            self.feature_names.iter().map(String::as_str).eq(FEATURE_COLUMNS),
            "Model column order {:?} does not match expected {:?}",
            self.feature_names,
            FEATURE_COLUMNS
        );
        ensure!(
            self.coefficients.len() == FEATURE_COUNT,
            "Expected {} coefficients, found {}",
            FEATURE_COUNT,
            self.coefficients.len()
        );
        ensure!(
            self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite()),
            "Model parameters must be finite"
        );
        Ok(())
    }
}

impl Scorer for LogisticScorer {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<f64> {
        let logit = self
            .coefficients
            .iter()
            .zip(row.as_slice())
            .map(|(w, &x)| w * x as f64)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(logit))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
