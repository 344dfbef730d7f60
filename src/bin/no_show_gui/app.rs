//! Application state and prediction trigger.

use no_show_predictor::types::{
    AppointmentRecord, Gender, RiskAssessment, RiskTierThresholds, Weekday,
};
use no_show_predictor::InferenceEngine;
use tracing::{error, info};

/// Widget-bound form fields. Flags are checkboxes, so they live here as bools.
#[derive(Debug, Clone)]
pub struct FormState {
    pub age: i64,
    pub waiting_days: i64,
    pub gender: Gender,
    pub appt_weekday: Weekday,
    pub scholarship: bool,
    pub hipertension: bool,
    pub diabetes: bool,
    pub alcoholism: bool,
    pub handcap: bool,
    pub sms_received: bool,
}

impl FormState {
    pub fn to_record(&self) -> AppointmentRecord {
        AppointmentRecord {
            age: self.age,
            waiting_days: self.waiting_days,
            scholarship: i64::from(self.scholarship),
            hipertension: i64::from(self.hipertension),
            diabetes: i64::from(self.diabetes),
            alcoholism: i64::from(self.alcoholism),
            handcap: i64::from(self.handcap),
            sms_received: i64::from(self.sms_received),
            gender: self.gender,
            appt_weekday: self.appt_weekday,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            age: 40,
            waiting_days: 3,
            gender: Gender::Female,
            appt_weekday: Weekday::Tuesday,
            scholarship: false,
            hipertension: false,
            diabetes: false,
            alcoholism: false,
            handcap: false,
            sms_received: true,
        }
    }
}

/// Result of the last button press
pub enum Outcome {
    Scored {
        assessment: RiskAssessment,
        /// Pretty-printed feature mapping that was scored
        payload: String,
    },
    Failed(String),
}

pub struct PredictorApp {
    engine: InferenceEngine,
    pub thresholds: RiskTierThresholds,
    pub form: FormState,
    pub outcome: Option<Outcome>,
}

impl PredictorApp {
    pub fn new(engine: InferenceEngine, thresholds: RiskTierThresholds) -> Self {
        Self {
            engine,
            thresholds,
            form: FormState::default(),
            outcome: None,
        }
    }

    /// Score the current form. Only called from the predict button.
    pub fn predict(&mut self) {
        let record = self.form.to_record();

        let outcome = match self.engine.assess(&record, &self.thresholds) {
            Ok(assessment) => {
                info!(
                    probability = assessment.probability,
                    tier = assessment.tier.label(),
                    "Prediction requested from form"
                );
                let payload = serde_json::to_string_pretty(&record)
                    .unwrap_or_else(|e| format!("<unavailable: {e}>"));
                Outcome::Scored {
                    assessment,
                    payload,
                }
            }
            Err(e) => {
                error!(error = %e, "Form prediction failed");
                Outcome::Failed(e.to_string())
            }
        };

        self.outcome = Some(outcome);
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            eframe::egui::ScrollArea::vertical().show(ui, |ui| {
                crate::ui::form::draw_form(ui, self);
                ui.separator();
                crate::ui::result_view::draw_result(ui, self);
            });
        });
    }
}
