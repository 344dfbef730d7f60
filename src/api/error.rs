//! Mapping of adapter errors onto HTTP responses

use crate::models::inference::PredictError;
use crate::types::appointment::ValidationError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Shape or range violation; the request never reached the model
    #[error("request validation failed ({} problem(s))", .0.len())]
    Validation(Vec<ValidationError>),
    #[error(transparent)]
    Inference(#[from] PredictError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({ "detail": errors }),
            ApiError::Inference(err) => json!({ "detail": err.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
