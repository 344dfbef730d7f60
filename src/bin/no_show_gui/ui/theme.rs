//! Light clinical theme with traffic-light tier colours.

use eframe::egui::{self, Color32, Visuals};
use no_show_predictor::RiskTier;

pub const COLOR_LOW: Color32 = Color32::from_rgb(60, 170, 90);
pub const COLOR_MODERATE: Color32 = Color32::from_rgb(215, 165, 30);
pub const COLOR_HIGH: Color32 = Color32::from_rgb(210, 60, 60);
pub const COLOR_ERROR: Color32 = Color32::from_rgb(200, 80, 40);

pub fn tier_color(tier: RiskTier) -> Color32 {
    match tier {
        RiskTier::Low => COLOR_LOW,
        RiskTier::Moderate => COLOR_MODERATE,
        RiskTier::High => COLOR_HIGH,
    }
}

pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(Visuals::light());

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    ctx.set_style(style);
}
