//! No-Show Risk Predictor GUI: eframe/egui desktop form.

mod app;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::PredictorApp;
use no_show_predictor::{config::AppConfig, logging, models::inference::InferenceEngine};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    // Same fatal-startup rule as the server: no window without a model
    let engine = InferenceEngine::from_config(&config)
        .with_context(|| format!("Failed to load model artifact {}", config.model.path))?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("No-Show Risk Predictor")
            .with_inner_size([760.0, 720.0])
            .with_min_inner_size([600.0, 480.0]),
        ..Default::default()
    };

    let thresholds = config.risk_tiers.clone();
    eframe::run_native(
        "No-Show Risk Predictor",
        options,
        Box::new(move |cc| {
            ui::theme::apply_theme(&cc.egui_ctx);
            Ok(Box::new(PredictorApp::new(engine, thresholds)))
        }),
    )
    .map_err(|e| anyhow!("GUI terminated with an error: {e}"))
}
