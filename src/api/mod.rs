//! HTTP adapter: liveness check and the scoring endpoint

pub mod error;
pub mod handlers;

use crate::metrics::ServiceMetrics;
use crate::models::inference::InferenceEngine;
use crate::types::appointment::ValidationError;
use crate::types::risk::RiskTierThresholds;
use actix_web::web;
use std::sync::Arc;

pub use error::ApiError;
pub use handlers::{HealthStatus, PredictionOutput};

/// Shared state handed to every request handler
pub struct AppState {
    pub engine: InferenceEngine,
    pub metrics: Arc<ServiceMetrics>,
    pub risk_tiers: RiskTierThresholds,
}

impl AppState {
    pub fn new(
        engine: InferenceEngine,
        metrics: Arc<ServiceMetrics>,
        risk_tiers: RiskTierThresholds,
    ) -> Self {
        Self {
            engine,
            metrics,
            risk_tiers,
        }
    }
}

/// Register routes and the JSON body error handler
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, req| {
        if let Some(state) = req.app_data::<web::Data<AppState>>() {
            state.metrics.record_rejection();
        }
        tracing::warn!(error = %err, "Rejected malformed request body");
        ApiError::Validation(vec![ValidationError {
            field: "body".to_string(),
            message: err.to_string(),
        }])
        .into()
    });

    cfg.app_data(json_config)
        .route("/", web::get().to(handlers::health_check))
        .route("/predict", web::post().to(handlers::predict));
}
