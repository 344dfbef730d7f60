//! Inference engine for no-show prediction

use crate::config::AppConfig;
use crate::feature_extractor::FeatureExtractor;
use crate::models::loader::ModelLoader;
use crate::models::scorer::Scorer;
use crate::types::appointment::AppointmentRecord;
use crate::types::risk::{RiskAssessment, RiskTierThresholds};
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while turning a field mapping into a probability
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("missing required feature: {0}")]
    MissingField(&'static str),
    #[error("feature {column} has the wrong shape: expected {expected}")]
    InvalidShape {
        column: &'static str,
        expected: &'static str,
    },
    #[error("scoring failed: {0}")]
    Scoring(#[from] anyhow::Error),
}

/// Scores appointments against the process-wide loaded model.
///
/// Cheap to clone; all clones share the same scorer.
#[derive(Clone)]
pub struct InferenceEngine {
    scorer: Arc<dyn Scorer>,
    extractor: FeatureExtractor,
}

impl InferenceEngine {
    /// Wrap an already-loaded scorer
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self {
            scorer,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Load the configured artifact and build the engine
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.model.onnx_threads);
        let engine = Self::new(loader.load(&config.model.path)?);

        info!(
            model = %engine.model_name(),
            features = engine.extractor.feature_count(),
            columns = ?engine.extractor.feature_names(),
            "Inference engine initialized"
        );

        Ok(engine)
    }

    pub fn model_name(&self) -> &str {
        self.scorer.name()
    }

    /// Probability that the appointment described by `features` is missed.
    ///
    /// `features` must hold all ten model columns; the row handed to the
    /// scorer is always rebuilt in training column order.
    pub fn predict_no_show(&self, features: &HashMap<String, Value>) -> Result<f64, PredictError> {
        let row = self.extractor.extract(features)?;
        let probability = self.scorer.predict_proba(&row)?;

        if !(0.0..=1.0).contains(&probability) {
            return Err(PredictError::Scoring(anyhow!(
                "model {} returned {} outside [0, 1]",
                self.scorer.name(),
                probability
            )));
        }

        debug!(
            model = %self.scorer.name(),
            probability = probability,
            "Inference complete"
        );

        Ok(probability)
    }

    /// Score a validated typed record
    pub fn predict_record(&self, record: &AppointmentRecord) -> Result<f64, PredictError> {
        self.predict_no_show(&record.to_feature_map())
    }

    /// Score a record and bucket it for display
    pub fn assess(
        &self,
        record: &AppointmentRecord,
        thresholds: &RiskTierThresholds,
    ) -> Result<RiskAssessment, PredictError> {
        let probability = self.predict_record(record)?;
        Ok(RiskAssessment::new(probability, thresholds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_extractor::{FeatureRow, FEATURE_COLUMNS};
    use crate::types::risk::RiskTier;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::sync::Mutex;

    /// Returns a fixed score and remembers every row it was given
    struct RecordingScorer {
        score: f64,
        rows: Mutex<Vec<FeatureRow>>,
    }

    impl RecordingScorer {
        fn new(score: f64) -> Arc<Self> {
            Arc::new(Self {
                score,
                rows: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl Scorer for RecordingScorer {
        fn name(&self) -> &str {
            "recording"
        }

        fn predict_proba(&self, row: &FeatureRow) -> Result<f64> {
            self.rows.lock().unwrap().push(*row);
            Ok(self.score)
        }
    }

    /// Score depends on every column and its position
    struct PositionalScorer;

    impl Scorer for PositionalScorer {
        fn name(&self) -> &str {
            "positional"
        }

        fn predict_proba(&self, row: &FeatureRow) -> Result<f64> {
            let logit: f64 = row
                .as_slice()
                .iter()
                .enumerate()
                .map(|(i, &x)| (i as f64 + 1.0) * 0.01 * x as f64)
                .sum::<f64>()
                - 1.0;
            Ok(1.0 / (1.0 + (-logit).exp()))
        }
    }

    #[test]
    fn test_predict_returns_scorer_probability() {
        let scorer = RecordingScorer::new(0.37);
        let engine = InferenceEngine::new(scorer.clone());

        let probability = engine.predict_record(&AppointmentRecord::default()).unwrap();

        assert_eq!(probability, 0.37);
        assert_eq!(scorer.calls(), 1);
        assert_eq!(engine.model_name(), "recording");
    }

    #[test]
    fn test_shuffled_mapping_gives_same_result() {
        let engine = InferenceEngine::new(Arc::new(PositionalScorer));
        let record = AppointmentRecord {
            age: 23,
            waiting_days: 14,
            hipertension: 1,
            ..Default::default()
        };
        let canonical = engine.predict_record(&record).unwrap();

        let map = record.to_feature_map();
        let mut entries: Vec<(String, Value)> = map.into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            entries.shuffle(&mut rng);
            let shuffled: HashMap<String, Value> = entries.iter().cloned().collect();
            assert_eq!(engine.predict_no_show(&shuffled).unwrap(), canonical);
        }
    }

    #[test]
    fn test_scorer_receives_training_order() {
        let scorer = RecordingScorer::new(0.1);
        let engine = InferenceEngine::new(scorer.clone());
        let record = AppointmentRecord {
            age: 71,
            handcap: 2,
            ..Default::default()
        };

        engine.predict_record(&record).unwrap();

        let rows = scorer.rows.lock().unwrap();
        let row = rows[0];
        for (idx, column) in FEATURE_COLUMNS.iter().enumerate() {
            assert_eq!(row.get(column), Some(row.as_slice()[idx]));
        }
        assert_eq!(row.as_slice()[0], 71.0);
        assert_eq!(row.as_slice()[6], 2.0);
    }

    #[test]
    fn test_missing_field_fails_before_scoring() {
        let scorer = RecordingScorer::new(0.5);
        let engine = InferenceEngine::new(scorer.clone());
        let mut features = AppointmentRecord::default().to_feature_map();
        features.remove("Gender");

        let err = engine.predict_no_show(&features).unwrap_err();

        assert!(matches!(err, PredictError::MissingField("Gender")));
        assert_eq!(scorer.calls(), 0);
    }

    #[test]
    fn test_out_of_range_score_is_error() {
        let engine = InferenceEngine::new(RecordingScorer::new(1.5));
        let err = engine.predict_record(&AppointmentRecord::default()).unwrap_err();
        assert!(matches!(err, PredictError::Scoring(_)));

        let engine = InferenceEngine::new(RecordingScorer::new(f64::NAN));
        assert!(engine.predict_record(&AppointmentRecord::default()).is_err());
    }

    #[test]
    fn test_deterministic() {
        let engine = InferenceEngine::new(Arc::new(PositionalScorer));
        let record = AppointmentRecord::default();

        let first = engine.predict_record(&record).unwrap();
        for _ in 0..10 {
            assert_eq!(engine.predict_record(&record).unwrap(), first);
        }
        assert!((0.0..=1.0).contains(&first));
    }

    #[test]
    fn test_assess_tiers_without_changing_probability() {
        let engine = InferenceEngine::new(RecordingScorer::new(0.5));
        let assessment = engine
            .assess(&AppointmentRecord::default(), &RiskTierThresholds::default())
            .unwrap();

        assert_eq!(assessment.probability, 0.5);
        assert_eq!(assessment.tier, RiskTier::High);
    }
}
