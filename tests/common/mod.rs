#![allow(dead_code)]

use anyhow::{anyhow, Result};
use no_show_predictor::api::AppState;
use no_show_predictor::metrics::ServiceMetrics;
use no_show_predictor::models::LogisticScorer;
use no_show_predictor::types::RiskTierThresholds;
use no_show_predictor::{FeatureRow, InferenceEngine, Scorer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logistic scorer that also counts how often it was called
pub struct CountingScorer {
    inner: LogisticScorer,
    calls: AtomicUsize,
}

impl CountingScorer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: sample_logistic(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Scorer for CountingScorer {
    fn name(&self) -> &str {
        "counting"
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.predict_proba(row)
    }
}

/// Always fails, to exercise the inference-time error path
pub struct BrokenScorer;

impl Scorer for BrokenScorer {
    fn name(&self) -> &str {
        "broken"
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<f64> {
        Err(anyhow!("session crashed"))
    }
}

/// Hand-picked coefficients with the usual signs for this problem
pub fn sample_logistic() -> LogisticScorer {
    LogisticScorer::new(
        "sample",
        [
            -0.012, // Age
            0.021,  // WaitingDays
            0.15,   // Scholarship
            -0.08,  // Hipertension
            0.02,   // Diabetes
            0.05,   // Alcoholism
            -0.03,  // Handcap
            0.35,   // SMS_received
            -0.01,  // Gender
            0.02,   // ApptWeekday
        ],
        -1.3,
    )
}

pub fn app_state(scorer: Arc<dyn Scorer>) -> AppState {
    AppState::new(
        InferenceEngine::new(scorer),
        Arc::new(ServiceMetrics::new()),
        RiskTierThresholds::default(),
    )
}
