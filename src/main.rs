//! No-Show Predictor - HTTP Server Entry Point
//!
//! Loads the classifier artifact once, then serves `GET /` and `POST /predict`.

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use no_show_predictor::{
    api::{self, AppState},
    config::AppConfig,
    logging,
    metrics::{MetricsReporter, ServiceMetrics},
    models::inference::InferenceEngine,
};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    info!("Starting No-Show Predictor");
    info!(
        "Risk tiers: moderate>={:.2}, high>={:.2}",
        config.risk_tiers.moderate, config.risk_tiers.high
    );

    // A missing or unreadable artifact stops the process before the port is bound
    let engine = InferenceEngine::from_config(&config)
        .with_context(|| format!("Failed to load model artifact {}", config.model.path))?;

    let metrics = Arc::new(ServiceMetrics::new());
    if config.metrics.report_interval_secs > 0 {
        let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
        actix_web::rt::spawn(reporter.start());
    }

    let state = web::Data::new(AppState::new(
        engine,
        metrics.clone(),
        config.risk_tiers.clone(),
    ));

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Listening"
    );

    server
        .bind((config.server.host.as_str(), config.server.port))
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    info!("Server shutting down...");
    metrics.print_summary();

    Ok(())
}
