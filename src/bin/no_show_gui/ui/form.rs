//! Input form: header, disclaimer, the ten appointment fields and the trigger.

use eframe::egui;
use no_show_predictor::types::{Gender, Weekday};

use crate::app::PredictorApp;

pub fn draw_form(ui: &mut egui::Ui, app: &mut PredictorApp) {
    ui.heading("🩺 Medical Appointment No-Show Risk Predictor");
    ui.label(
        "This tool estimates the probability that a patient will miss their scheduled \
         appointment, based on historical behavior patterns in a public Brazilian hospital dataset.",
    );
    ui.label(
        egui::RichText::new(
            "⚠ Disclaimer: learning and demo project only. Not intended for real clinical decision-making.",
        )
        .italics(),
    );
    ui.add_space(8.0);

    ui.heading("Input Appointment Details");
    ui.columns(2, |cols| {
        draw_patient_column(&mut cols[0], app);
        draw_condition_column(&mut cols[1], app);
    });

    ui.add_space(8.0);
    if ui.button("Predict No-Show Risk").clicked() {
        app.predict();
    }
}

fn draw_patient_column(ui: &mut egui::Ui, app: &mut PredictorApp) {
    let form = &mut app.form;

    ui.add(egui::Slider::new(&mut form.age, 0..=100).text("Patient Age"));
    ui.add(
        egui::Slider::new(&mut form.waiting_days, -1..=60)
            .text("Days Between Scheduling and Appointment"),
    )
    .on_hover_text("0 = same-day; negative means scheduled after the appointment date (data quirks).");

    egui::ComboBox::from_label("Gender")
        .selected_text(form.gender.as_str())
        .show_ui(ui, |ui| {
            for gender in Gender::ALL {
                ui.selectable_value(&mut form.gender, gender, gender.as_str());
            }
        });

    egui::ComboBox::from_label("Appointment Weekday")
        .selected_text(form.appt_weekday.as_str())
        .show_ui(ui, |ui| {
            for day in Weekday::ALL {
                ui.selectable_value(&mut form.appt_weekday, day, day.as_str());
            }
        });
}

fn draw_condition_column(ui: &mut egui::Ui, app: &mut PredictorApp) {
    let form = &mut app.form;

    ui.checkbox(&mut form.scholarship, "On Scholarship (Government assistance)?");
    ui.checkbox(&mut form.hipertension, "Hypertension");
    ui.checkbox(&mut form.diabetes, "Diabetes");
    ui.checkbox(&mut form.alcoholism, "Alcoholism");
    ui.checkbox(&mut form.handcap, "Any Handicap");
    ui.checkbox(&mut form.sms_received, "SMS Reminder Sent");
}
