//! Display tiers for no-show probabilities

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk tier shown to staff. Tiering is presentation only and never alters the probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Determine the tier from a probability and thresholds
    pub fn from_probability(probability: f64, thresholds: &RiskTierThresholds) -> Self {
        if probability >= thresholds.high {
            RiskTier::High
        } else if probability >= thresholds.moderate {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            RiskTier::Low => "🟢",
            RiskTier::Moderate => "🟡",
            RiskTier::High => "🔴",
        }
    }

    /// Recommended action for scheduling staff
    pub fn message(self) -> &'static str {
        match self {
            RiskTier::Low => "Patient is unlikely to miss the appointment.",
            RiskTier::Moderate => "Consider a reminder, but risk is not extreme.",
            RiskTier::High => "Patient has elevated no-show risk. Prioritize outreach.",
        }
    }
}

/// Lower bounds of the Moderate and High tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskTierThresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Default for RiskTierThresholds {
    fn default() -> Self {
        Self {
            moderate: 0.25,
            high: 0.5,
        }
    }
}

impl RiskTierThresholds {
    /// Both bounds must lie in [0, 1] with `moderate <= high`
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.moderate) && (0.0..=1.0).contains(&self.high),
            "Risk tier thresholds must lie in [0, 1], got moderate={} high={}",
            self.moderate,
            self.high
        );
        ensure!(
            self.moderate <= self.high,
            "Moderate threshold {} is above high threshold {}",
            self.moderate,
            self.high
        );
        Ok(())
    }
}

/// A scored appointment ready for display
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub tier: RiskTier,
    pub assessed_at: DateTime<Utc>,
}

impl RiskAssessment {
    pub fn new(probability: f64, thresholds: &RiskTierThresholds) -> Self {
        Self {
            probability,
            tier: RiskTier::from_probability(probability, thresholds),
            assessed_at: Utc::now(),
        }
    }

    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let thresholds = RiskTierThresholds::default();

        assert_eq!(RiskTier::from_probability(0.0, &thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(0.2499, &thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(0.25, &thresholds), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.4999, &thresholds), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.5, &thresholds), RiskTier::High);
        assert_eq!(RiskTier::from_probability(1.0, &thresholds), RiskTier::High);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(RiskTierThresholds::default().validate().is_ok());

        let inverted = RiskTierThresholds {
            moderate: 0.6,
            high: 0.5,
        };
        assert!(inverted.validate().is_err());

        let out_of_range = RiskTierThresholds {
            moderate: 0.25,
            high: 1.5,
        };
        assert!(out_of_range.validate().is_err());

        let nan = RiskTierThresholds {
            moderate: f64::NAN,
            high: 0.5,
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_assessment_keeps_probability() {
        let assessment = RiskAssessment::new(0.4321, &RiskTierThresholds::default());

        assert_eq!(assessment.probability, 0.4321);
        assert_eq!(assessment.tier, RiskTier::Moderate);
        assert!((assessment.percent() - 43.21).abs() < 1e-9);
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&RiskTier::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }
}
