use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::calculator::{count_business_days, expected_drr, parse_lead_count};
use crate::error::ValidationError;
use crate::model::record::{self, Record};
use crate::time::parse_date;

/// The three form inputs, exactly as typed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub start_date: String,
    pub end_date: String,
    pub lead_count: String,
}

/// A draft that passed every client-side check, with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub lead_count: f64,
    pub number_of_days: u32,
    pub expected_drr: String,
}

impl RecordDraft {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>, lead_count: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            lead_count: lead_count.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let start_date = required_date(record::START_DATE, &self.start_date)?;
        let end_date = required_date(record::END_DATE, &self.end_date)?;

        let lead_input = self.lead_count.trim();
        if lead_input.is_empty() {
            return Err(ValidationError::MissingField(record::LEAD_COUNT));
        }
        let lead_count = parse_lead_count(lead_input)
            .ok_or_else(|| ValidationError::InvalidLeadCount(lead_input.to_string()))?;
        if lead_count < 0.0 {
            return Err(ValidationError::NegativeLeadCount);
        }

        let number_of_days = count_business_days(start_date, end_date);
        if number_of_days == 0 {
            return Err(ValidationError::NoBusinessDays);
        }
        let expected_drr = expected_drr(lead_count, number_of_days).ok_or(ValidationError::DrrUnavailable)?;

        Ok(ValidDraft {
            start_date,
            end_date,
            lead_count,
            number_of_days,
            expected_drr,
        })
    }
}

fn required_date(field: &'static str, input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    parse_date(input).map_err(|_| ValidationError::InvalidDate {
        field,
        value: input.to_string(),
    })
}

impl ValidDraft {
    /// The submission body: raw inputs plus the derived fields.
    pub fn into_record(self, id: String) -> Record {
        let mut fields = serde_json::Map::new();
        fields.insert(record::ID.to_string(), Value::String(id));
        fields.insert(
            record::START_DATE.to_string(),
            Value::String(self.start_date.format("%Y-%m-%d").to_string()),
        );
        fields.insert(
            record::END_DATE.to_string(),
            Value::String(self.end_date.format("%Y-%m-%d").to_string()),
        );
        fields.insert(record::LEAD_COUNT.to_string(), lead_count_value(self.lead_count));
        fields.insert(record::NUMBER_OF_DAYS.to_string(), Value::from(self.number_of_days));
        fields.insert(record::EXPECTED_DRR.to_string(), Value::String(self.expected_drr));
        Record::from_fields(fields)
    }
}

// Whole counts serialize as integers rather than `50.0`.
fn lead_count_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64 {
        Value::from(n as u64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_draft_derives_fields() {
        let valid = RecordDraft::new("2024-01-01", "2024-01-07", "50").validate().unwrap();
        assert_eq!(valid.number_of_days, 6);
        assert_eq!(valid.expected_drr, "8.33");

        let record = valid.into_record("a1".to_string());
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "a1",
                "startDate": "2024-01-01",
                "endDate": "2024-01-07",
                "leadCount": 50,
                "numberOfDays": 6,
                "expectedDRR": "8.33"
            })
        );
    }

    #[test]
    fn test_fractional_lead_count_kept() {
        let record = RecordDraft::new("2024-01-01", "2024-01-02", "7.5")
            .validate()
            .unwrap()
            .into_record("x".to_string());
        assert_eq!(record.get("leadCount"), Some(&json!(7.5)));
        assert_eq!(record.get("expectedDRR"), Some(&json!("3.75")));
    }

    #[test]
    fn test_lead_count_value_stays_float_past_u64() {
        assert_eq!(lead_count_value(50.0), json!(50));
        // 2^64 is the first float that no longer fits
        assert_eq!(lead_count_value(18_446_744_073_709_551_616.0), json!(18_446_744_073_709_551_616.0));
        assert_eq!(lead_count_value(1e30), json!(1e30));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            RecordDraft::new("", "2024-01-07", "50").validate(),
            Err(ValidationError::MissingField("startDate"))
        );
        assert_eq!(
            RecordDraft::new("2024-01-01", " ", "50").validate(),
            Err(ValidationError::MissingField("endDate"))
        );
        assert_eq!(
            RecordDraft::new("2024-01-01", "2024-01-07", "").validate(),
            Err(ValidationError::MissingField("leadCount"))
        );
    }

    #[test]
    fn test_rejects_non_numeric_lead_count() {
        assert_eq!(
            RecordDraft::new("2024-01-01", "2024-01-07", "abc").validate(),
            Err(ValidationError::InvalidLeadCount("abc".to_string()))
        );
        assert_eq!(
            RecordDraft::new("2024-01-01", "2024-01-07", "-1").validate(),
            Err(ValidationError::NegativeLeadCount)
        );
    }

    #[test]
    fn test_rejects_ranges_without_business_days() {
        // a lone Sunday
        assert_eq!(
            RecordDraft::new("2024-01-07", "2024-01-07", "10").validate(),
            Err(ValidationError::NoBusinessDays)
        );
        // start after end
        assert_eq!(
            RecordDraft::new("2024-01-07", "2024-01-01", "10").validate(),
            Err(ValidationError::NoBusinessDays)
        );
    }

    #[test]
    fn test_rejects_bad_date() {
        assert_eq!(
            RecordDraft::new("2024-13-01", "2024-01-07", "10").validate(),
            Err(ValidationError::InvalidDate { field: "startDate", value: "2024-13-01".to_string() })
        );
    }
}
