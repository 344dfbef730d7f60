//! Appointment record data structures

use crate::feature_extractor::{ColumnKind, FEATURE_SCHEMA};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Patient gender as recorded in the scheduling system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    /// Wire label ("F" or "M")
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == label)
    }

    /// Numeric code fed to the model (F = 0, M = 1)
    pub fn code(self) -> f32 {
        match self {
            Gender::Female => 0.0,
            Gender::Male => 1.0,
        }
    }
}

/// Day of the week the appointment is scheduled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == label)
    }

    /// Numeric code fed to the model (Monday = 0 ... Sunday = 6)
    pub fn code(self) -> f32 {
        self as u8 as f32
    }
}

/// A single scheduled appointment to be scored for no-show risk.
///
/// JSON field names are the column names the model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    /// Patient age in years
    #[serde(rename = "Age")]
    pub age: i64,

    /// Days between scheduling and the appointment (negative values exist in the source data)
    #[serde(rename = "WaitingDays")]
    pub waiting_days: i64,

    /// Enrolled in the government welfare programme (0/1)
    #[serde(rename = "Scholarship")]
    pub scholarship: i64,

    #[serde(rename = "Hipertension")]
    pub hipertension: i64,

    #[serde(rename = "Diabetes")]
    pub diabetes: i64,

    #[serde(rename = "Alcoholism")]
    pub alcoholism: i64,

    /// Handicap severity code (0 = none)
    #[serde(rename = "Handcap")]
    pub handcap: i64,

    /// An SMS reminder was sent (0/1)
    #[serde(rename = "SMS_received")]
    pub sms_received: i64,

    #[serde(rename = "Gender")]
    pub gender: Gender,

    #[serde(rename = "ApptWeekday")]
    pub appt_weekday: Weekday,
}

impl AppointmentRecord {
    /// Value of an integer column by its model column name
    pub fn integer_field(&self, column: &str) -> Option<i64> {
        match column {
            "Age" => Some(self.age),
            "WaitingDays" => Some(self.waiting_days),
            "Scholarship" => Some(self.scholarship),
            "Hipertension" => Some(self.hipertension),
            "Diabetes" => Some(self.diabetes),
            "Alcoholism" => Some(self.alcoholism),
            "Handcap" => Some(self.handcap),
            "SMS_received" => Some(self.sms_received),
            _ => None,
        }
    }

    /// Check every integer column against its declared range.
    ///
    /// Returns all violations at once so callers can report them together.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = FEATURE_SCHEMA
            .iter()
            .filter_map(|spec| match spec.kind {
                ColumnKind::Integer { min, max } => {
                    let value = self.integer_field(spec.name)?;
                    (value < min || value > max).then(|| ValidationError {
                        field: spec.name.to_string(),
                        message: format!(
                            "value {} is out of range (expected {} to {})",
                            value, min, max
                        ),
                    })
                }
                ColumnKind::Gender | ColumnKind::Weekday => None,
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Named field mapping, the input shape of the inference function
    pub fn to_feature_map(&self) -> HashMap<String, Value> {
        FEATURE_SCHEMA
            .iter()
            .map(|spec| {
                let value = match spec.kind {
                    ColumnKind::Integer { .. } => {
                        Value::from(self.integer_field(spec.name).unwrap_or_default())
                    }
                    ColumnKind::Gender => Value::from(self.gender.as_str()),
                    ColumnKind::Weekday => Value::from(self.appt_weekday.as_str()),
                };
                (spec.name.to_string(), value)
            })
            .collect()
    }
}

impl Default for AppointmentRecord {
    fn default() -> Self {
        Self {
            age: 40,
            waiting_days: 3,
            scholarship: 0,
            hipertension: 0,
            diabetes: 0,
            alcoholism: 0,
            handcap: 0,
            sms_received: 1,
            gender: Gender::Female,
            appt_weekday: Weekday::Tuesday,
        }
    }
}

/// A single field that failed range validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization() {
        let json = r#"{"Age":40,"WaitingDays":3,"Scholarship":0,"Hipertension":0,"Diabetes":0,
            "Alcoholism":0,"Handcap":0,"SMS_received":1,"Gender":"F","ApptWeekday":"Tuesday"}"#;

        let record: AppointmentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record, AppointmentRecord::default());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = r#"{"Age":40,"WaitingDays":3,"Scholarship":0,"Hipertension":0,"Diabetes":0,
            "Alcoholism":0,"Handcap":0,"SMS_received":1,"Gender":"X","ApptWeekday":"Tuesday"}"#;

        assert!(serde_json::from_str::<AppointmentRecord>(json).is_err());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(AppointmentRecord::default().validate().is_ok());

        let record = AppointmentRecord {
            age: 200,
            scholarship: 2,
            ..Default::default()
        };
        let errors = record.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Age", "Scholarship"]);

        let negative_wait = AppointmentRecord {
            waiting_days: -30,
            handcap: 4,
            ..Default::default()
        };
        assert!(negative_wait.validate().is_ok());

        let too_early = AppointmentRecord {
            waiting_days: -31,
            ..Default::default()
        };
        assert!(too_early.validate().is_err());
    }

    #[test]
    fn test_validate_inclusive_bounds() {
        let at_upper = AppointmentRecord {
            age: 120,
            waiting_days: 365,
            handcap: 4,
            sms_received: 1,
            ..Default::default()
        };
        assert!(at_upper.validate().is_ok());

        let at_lower = AppointmentRecord {
            age: 0,
            waiting_days: -30,
            scholarship: 0,
            handcap: 0,
            sms_received: 0,
            ..Default::default()
        };
        assert!(at_lower.validate().is_ok());

        let cases = [
            ("Age", AppointmentRecord { age: 121, ..Default::default() }),
            ("Age", AppointmentRecord { age: -1, ..Default::default() }),
            ("WaitingDays", AppointmentRecord { waiting_days: 366, ..Default::default() }),
            ("Handcap", AppointmentRecord { handcap: 5, ..Default::default() }),
            ("Handcap", AppointmentRecord { handcap: -1, ..Default::default() }),
            ("SMS_received", AppointmentRecord { sms_received: 2, ..Default::default() }),
        ];

        for (field, record) in cases {
            let errors = record.validate().unwrap_err();
            assert_eq!(errors.len(), 1, "{field}");
            assert_eq!(errors[0].field, field);
        }
    }

    #[test]
    fn test_feature_map_uses_column_names() {
        let map = AppointmentRecord::default().to_feature_map();

        assert_eq!(map.len(), 10);
        assert_eq!(map["Age"], Value::from(40));
        assert_eq!(map["SMS_received"], Value::from(1));
        assert_eq!(map["Gender"], Value::from("F"));
        assert_eq!(map["ApptWeekday"], Value::from("Tuesday"));
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(Gender::parse("M"), Some(Gender::Male));
        assert_eq!(Gender::Male.code(), 1.0);
        assert_eq!(Weekday::parse("Sunday").map(Weekday::code), Some(6.0));
        assert_eq!(Weekday::parse("sunday"), None);
    }
}
