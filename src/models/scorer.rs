//! Scoring interface shared by all model backends

use crate::feature_extractor::FeatureRow;
use anyhow::Result;

/// A loaded, read-only classifier.
///
/// Implementations are shared across request workers for the life of the
/// process, so scoring takes `&self`.
pub trait Scorer: Send + Sync {
    /// Model name for logging
    fn name(&self) -> &str;

    /// Probability of the positive (no-show) class for one row
    fn predict_proba(&self, row: &FeatureRow) -> Result<f64>;
}
