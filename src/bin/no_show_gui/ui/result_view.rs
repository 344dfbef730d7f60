//! Prediction panel: probability, tier and the raw payload.

use eframe::egui;

use crate::app::{Outcome, PredictorApp};
use crate::ui::theme;

pub fn draw_result(ui: &mut egui::Ui, app: &PredictorApp) {
    match &app.outcome {
        None => {
            ui.label("Fill in the appointment details and click Predict No-Show Risk.");
        }
        Some(Outcome::Failed(message)) => {
            ui.colored_label(theme::COLOR_ERROR, format!("Prediction failed: {message}"));
        }
        Some(Outcome::Scored {
            assessment,
            payload,
        }) => {
            let tier = assessment.tier;

            ui.heading("Prediction");
            ui.label("Estimated No-Show Probability");
            ui.label(egui::RichText::new(format!("{:.1}%", assessment.percent())).size(28.0));

            ui.horizontal(|ui| {
                ui.strong("Risk Level:");
                ui.colored_label(
                    theme::tier_color(tier),
                    egui::RichText::new(format!("{} {}", tier.indicator(), tier.label())).strong(),
                );
            });
            ui.label(tier.message());
            ui.small(format!(
                "Scored at {}",
                assessment.assessed_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));

            egui::CollapsingHeader::new("View raw feature payload").show(ui, |ui| {
                ui.monospace(payload.as_str());
            });
        }
    }
}
