use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::calculator::parse_lead_count;
use crate::error::ValidationError;
use crate::time::parse_date;

pub const ID: &str = "id";
pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";
pub const LEAD_COUNT: &str = "leadCount";
pub const NUMBER_OF_DAYS: &str = "numberOfDays";
pub const EXPECTED_DRR: &str = "expectedDRR";

/// A stored entry, kept as the exact JSON object the client submitted.
///
/// The store never rewrites records, so unknown fields survive a round trip
/// and the typed accessors below only read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Only string ids can be matched by the delete route.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID).and_then(Value::as_str)
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date_field(START_DATE)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.date_field(END_DATE)
    }

    /// `leadCount` may arrive as a JSON number or as the raw input text.
    pub fn lead_count(&self) -> Option<f64> {
        match self.0.get(LEAD_COUNT)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_lead_count(s),
            _ => None,
        }
    }

    fn date_field(&self, key: &str) -> Option<NaiveDate> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .and_then(|s| parse_date(s).ok())
    }

    /// Schema check for servers that refuse malformed bodies.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingField(ID));
        }
        for field in [START_DATE, END_DATE] {
            match self.0.get(field) {
                None | Some(Value::Null) => return Err(ValidationError::MissingField(field)),
                Some(value) => {
                    if self.date_field(field).is_none() {
                        return Err(ValidationError::InvalidDate {
                            field,
                            value: display_value(value),
                        });
                    }
                }
            }
        }
        match self.0.get(LEAD_COUNT) {
            None | Some(Value::Null) => Err(ValidationError::MissingField(LEAD_COUNT)),
            Some(value) => match self.lead_count() {
                None => Err(ValidationError::InvalidLeadCount(display_value(value))),
                Some(n) if n < 0.0 => Err(ValidationError::NegativeLeadCount),
                Some(_) => Ok(()),
            },
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
