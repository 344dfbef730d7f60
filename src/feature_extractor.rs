//! Feature extraction for no-show model inference.
//!
//! This module turns a named field mapping into the single ordered row
//! the trained model expects. The model is order-sensitive: a row built
//! in any other column order silently mispredicts instead of failing.

use crate::models::inference::PredictError;
use crate::types::appointment::{Gender, Weekday};
use serde_json::Value;
use std::collections::HashMap;

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 10;

/// How a column is typed and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer column with its declared inclusive range
    Integer { min: i64, max: i64 },
    /// "F" / "M"
    Gender,
    /// Weekday name
    Weekday,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Model input schema in training column order.
///
/// Shared by request validation and row construction.
pub const FEATURE_SCHEMA: [ColumnSpec; FEATURE_COUNT] = [
    ColumnSpec {
        name: "Age",
        kind: ColumnKind::Integer { min: 0, max: 120 },
    },
    ColumnSpec {
        name: "WaitingDays",
        kind: ColumnKind::Integer { min: -30, max: 365 },
    },
    ColumnSpec {
        name: "Scholarship",
        kind: ColumnKind::Integer { min: 0, max: 1 },
    },
    ColumnSpec {
        name: "Hipertension",
        kind: ColumnKind::Integer { min: 0, max: 1 },
    },
    ColumnSpec {
        name: "Diabetes",
        kind: ColumnKind::Integer { min: 0, max: 1 },
    },
    ColumnSpec {
        name: "Alcoholism",
        kind: ColumnKind::Integer { min: 0, max: 1 },
    },
    // Severity codes above 1 occur in the source data
    ColumnSpec {
        name: "Handcap",
        kind: ColumnKind::Integer { min: 0, max: 4 },
    },
    ColumnSpec {
        name: "SMS_received",
        kind: ColumnKind::Integer { min: 0, max: 1 },
    },
    ColumnSpec {
        name: "Gender",
        kind: ColumnKind::Gender,
    },
    ColumnSpec {
        name: "ApptWeekday",
        kind: ColumnKind::Weekday,
    },
];

/// Column names in training order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = {
    let mut names = [""; FEATURE_COUNT];
    let mut i = 0;
    while i < FEATURE_COUNT {
        names[i] = FEATURE_SCHEMA[i].name;
        i += 1;
    }
    names
};

/// One encoded model input row, always in `FEATURE_COLUMNS` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow([f32; FEATURE_COUNT]);

impl FeatureRow {
    pub fn new(values: [f32; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Encoded value of a column by name
    pub fn get(&self, column: &str) -> Option<f32> {
        FEATURE_COLUMNS
            .iter()
            .position(|&name| name == column)
            .map(|idx| self.0[idx])
    }
}

/// Builds model rows from named field mappings.
///
/// Encoding: integers pass through, Gender is F = 0 / M = 1 and
/// ApptWeekday is Monday = 0 through Sunday = 6.
///
/// Integer columns accept JSON integers only. `40.0` and `true` are shape
/// errors, matching the typed request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract an ordered row from a field mapping.
    ///
    /// The mapping's own iteration order is irrelevant. Keys outside the
    /// schema are ignored; ranges are not checked here.
    pub fn extract(&self, features: &HashMap<String, Value>) -> Result<FeatureRow, PredictError> {
        let mut row = [0.0_f32; FEATURE_COUNT];

        for (slot, spec) in row.iter_mut().zip(FEATURE_SCHEMA.iter()) {
            let value = features
                .get(spec.name)
                .ok_or(PredictError::MissingField(spec.name))?;
            *slot = Self::encode(spec, value)?;
        }

        Ok(FeatureRow(row))
    }

    fn encode(spec: &ColumnSpec, value: &Value) -> Result<f32, PredictError> {
        let shape_error = |expected| PredictError::InvalidShape {
            column: spec.name,
            expected,
        };

        match spec.kind {
            ColumnKind::Integer { .. } => value
                .as_i64()
                .map(|v| v as f32)
                .ok_or_else(|| shape_error("an integer")),
            ColumnKind::Gender => value
                .as_str()
                .and_then(Gender::parse)
                .map(Gender::code)
                .ok_or_else(|| shape_error("\"F\" or \"M\"")),
            ColumnKind::Weekday => value
                .as_str()
                .and_then(Weekday::parse)
                .map(Weekday::code)
                .ok_or_else(|| shape_error("a weekday name")),
        }
    }

    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }
}
