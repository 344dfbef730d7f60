//! Request handlers

use crate::api::{ApiError, AppState};
use crate::types::appointment::AppointmentRecord;
use crate::types::risk::RiskTier;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Response body of `POST /predict`
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub no_show_probability: f64,
}

/// `GET /`
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// `POST /predict`
pub async fn predict(
    state: web::Data<AppState>,
    payload: web::Json<AppointmentRecord>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let record = payload.into_inner();

    if let Err(errors) = record.validate() {
        state.metrics.record_rejection();
        warn!(
            request_id = %request_id,
            problems = errors.len(),
            first = %errors[0],
            "Rejected appointment record"
        );
        return Err(ApiError::Validation(errors));
    }

    let start = Instant::now();
    let probability = state.engine.predict_record(&record).map_err(|e| {
        state.metrics.record_failure();
        error!(request_id = %request_id, error = %e, "Inference failed");
        ApiError::from(e)
    })?;
    let latency = start.elapsed();

    let tier = RiskTier::from_probability(probability, &state.risk_tiers);
    state.metrics.record_prediction(latency, probability, tier);

    info!(
        request_id = %request_id,
        probability = probability,
        tier = tier.label(),
        latency_us = latency.as_micros() as u64,
        "Prediction served"
    );

    Ok(HttpResponse::Ok().json(PredictionOutput {
        no_show_probability: probability,
    }))
}
