//! Sample Record Scorer
//!
//! Generates random appointment records, scores them with the configured
//! model and prints the resulting risk distribution.
//!
//! Usage: sample-records [count] [seed]

use no_show_predictor::{
    config::AppConfig,
    logging,
    metrics::ServiceMetrics,
    types::{AppointmentRecord, Gender, RiskTier, Weekday},
    InferenceEngine,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{info, warn};

/// Random record generator biased towards the shape of real scheduling data
struct RecordGenerator {
    rng: StdRng,
}

impl RecordGenerator {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn generate(&mut self) -> AppointmentRecord {
        // Most appointments are booked within two months
        let waiting_days = if self.rng.gen_bool(0.9) {
            self.rng.gen_range(0..=60)
        } else {
            self.rng.gen_range(-1..=180)
        };

        AppointmentRecord {
            age: self.rng.gen_range(0..=100),
            waiting_days,
            scholarship: self.flag(0.1),
            hipertension: self.flag(0.2),
            diabetes: self.flag(0.07),
            alcoholism: self.flag(0.03),
            handcap: if self.rng.gen_bool(0.02) {
                self.rng.gen_range(1..=4)
            } else {
                0
            },
            sms_received: self.flag(0.32),
            gender: if self.rng.gen_bool(0.65) {
                Gender::Female
            } else {
                Gender::Male
            },
            appt_weekday: Weekday::ALL[self.rng.gen_range(0..Weekday::ALL.len())],
        }
    }

    fn flag(&mut self, p: f64) -> i64 {
        i64::from(self.rng.gen_bool(p))
    }
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    let args: Vec<String> = std::env::args().collect();
    let count: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
    let seed: Option<u64> = args.get(2).and_then(|s| s.parse().ok());

    info!(
        model = %config.model.path,
        count = count,
        seed = ?seed,
        "Configuration loaded"
    );

    let engine = InferenceEngine::from_config(&config)?;
    let metrics = ServiceMetrics::new();
    let mut generator = RecordGenerator::new(seed);

    for i in 0..count {
        let record = generator.generate();

        if let Err(errors) = record.validate() {
            metrics.record_rejection();
            warn!(problems = errors.len(), "Generated record failed validation");
            continue;
        }

        let start = Instant::now();
        match engine.predict_record(&record) {
            Ok(probability) => {
                let tier = RiskTier::from_probability(probability, &config.risk_tiers);
                metrics.record_prediction(start.elapsed(), probability, tier);

                if i == 0 {
                    info!(
                        "Sample record:\n{}\n-> {:.3} ({})",
                        serde_json::to_string_pretty(&record)?,
                        probability,
                        tier.label()
                    );
                }
            }
            Err(e) => {
                metrics.record_failure();
                warn!(error = %e, "Scoring failed");
            }
        }
    }

    metrics.print_summary();
    Ok(())
}
