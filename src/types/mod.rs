//! Type definitions for appointment scoring

pub mod appointment;
pub mod risk;

pub use appointment::{AppointmentRecord, Gender, ValidationError, Weekday};
pub use risk::{RiskAssessment, RiskTier, RiskTierThresholds};
