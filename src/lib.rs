//! No-Show Risk Predictor Library
//!
//! Serves a pre-trained classifier that estimates the probability that a
//! patient misses a scheduled medical appointment.

pub mod api;
pub mod config;
pub mod feature_extractor;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod types;

pub use config::AppConfig;
pub use feature_extractor::{FeatureExtractor, FeatureRow, FEATURE_COLUMNS};
pub use models::inference::{InferenceEngine, PredictError};
pub use models::scorer::Scorer;
pub use types::{appointment::AppointmentRecord, risk::RiskTier};
