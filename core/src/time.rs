use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Asia::Kolkata;

/// Parses a calendar date as submitted by the form.
///
/// `YYYY-MM-DD` is what a date input produces; full RFC 3339 timestamps are
/// accepted too and keep their written date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }

    Err(anyhow!("Could not parse date: {}", input))
}

/// `en-IN` short date: day/month/year, no zero padding.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// `en-IN` date and 12-hour time on the Asia/Kolkata wall clock,
/// e.g. `18/10/2026, 3:05 pm`.
pub fn format_last_updated(at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&Kolkata);
    let (is_pm, hour) = local.hour12();
    format!(
        "{}, {}:{:02} {}",
        format_date(local.date_naive()),
        hour,
        local.minute(),
        if is_pm { "pm" } else { "am" }
    )
}
