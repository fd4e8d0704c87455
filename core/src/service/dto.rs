use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::calculator::{count_business_days, expected_drr, sundays_in_range};
use crate::model::record::{self, Record};
use crate::time::{format_date, format_last_updated};

/// One table row, recomputed from a stored record's raw fields.
///
/// Derived columns never trust the stored `numberOfDays`/`expectedDRR`;
/// they come from the calculator so submission and display agree.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_days: String,
    pub sundays: String,
    pub lead_count: String,
    #[serde(rename = "expectedDRR")]
    pub expected_drr: String,
    pub last_updated: String,
}

impl RecordRow {
    pub fn from_record(record: &Record, now: DateTime<Utc>) -> Self {
        let start = record.start_date();
        let end = record.end_date();

        let (number_of_days, sundays, drr) = match (start, end) {
            (Some(start), Some(end)) => {
                let days = count_business_days(start, end);
                let sundays = sundays_in_range(start, end)
                    .into_iter()
                    .map(format_date)
                    .collect::<Vec<_>>()
                    .join(", ");
                let drr = record
                    .lead_count()
                    .and_then(|n| expected_drr(n, days))
                    .unwrap_or_default();
                (days.to_string(), sundays, drr)
            }
            _ => (String::new(), String::new(), String::new()),
        };

        Self {
            id: record.id().unwrap_or_default().to_string(),
            start_date: start.map(format_date).unwrap_or_default(),
            end_date: end.map(format_date).unwrap_or_default(),
            number_of_days,
            sundays,
            lead_count: record.get(record::LEAD_COUNT).map(display_raw).unwrap_or_default(),
            expected_drr: drr,
            last_updated: format_last_updated(now),
        }
    }
}

fn display_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Sum of every lead count that parses; the rest are skipped.
pub fn total_lead_count(records: &[Record]) -> f64 {
    records.iter().filter_map(Record::lead_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 8, 4, 30, 0).unwrap()
    }

    #[test]
    fn test_row_recomputes_derived_columns() {
        // stored derived values are stale on purpose
        let record: Record = serde_json::from_value(json!({
            "id": "a1",
            "startDate": "2024-01-01",
            "endDate": "2024-01-14",
            "leadCount": "24",
            "numberOfDays": 99,
            "expectedDRR": "0.01"
        }))
        .unwrap();

        let row = RecordRow::from_record(&record, now());
        assert_eq!(row.id, "a1");
        assert_eq!(row.start_date, "1/1/2024");
        assert_eq!(row.end_date, "14/1/2024");
        assert_eq!(row.number_of_days, "12");
        assert_eq!(row.sundays, "7/1/2024, 14/1/2024");
        assert_eq!(row.lead_count, "24");
        assert_eq!(row.expected_drr, "2.00");
        assert_eq!(row.last_updated, "8/1/2024, 10:00 am");
    }

    #[test]
    fn test_row_with_missing_dates_is_blank() {
        let record: Record = serde_json::from_value(json!({ "id": "a1", "leadCount": 50 })).unwrap();
        let row = RecordRow::from_record(&record, now());
        assert_eq!(row.start_date, "");
        assert_eq!(row.number_of_days, "");
        assert_eq!(row.sundays, "");
        assert_eq!(row.lead_count, "50");
        assert_eq!(row.expected_drr, "");
    }

    #[test]
    fn test_row_with_only_sundays_has_no_drr() {
        let record: Record = serde_json::from_value(json!({
            "id": "s", "startDate": "2024-01-07", "endDate": "2024-01-07", "leadCount": 5
        }))
        .unwrap();
        let row = RecordRow::from_record(&record, now());
        assert_eq!(row.number_of_days, "0");
        assert_eq!(row.sundays, "7/1/2024");
        assert_eq!(row.expected_drr, "");
    }

    #[test]
    fn test_total_lead_count_skips_garbage() {
        let records: Vec<Record> = serde_json::from_value(json!([
            { "id": "a", "leadCount": 50 },
            { "id": "b", "leadCount": "12.5" },
            { "id": "c", "leadCount": "lots" },
            { "id": "d" }
        ]))
        .unwrap();
        assert_eq!(total_lead_count(&records), 62.5);
    }
}
