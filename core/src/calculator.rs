//! Business-day and daily-run-rate arithmetic.
//!
//! A business day is any calendar day that is not a Sunday. Ranges are
//! inclusive on both ends; a range whose start falls after its end is empty.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::prelude::*;
use serde::Serialize;

/// Every calendar day from `start` to `end`, inclusive, in ascending order.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

fn is_sunday(date: &NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> u32 {
    days_in_range(start, end).filter(|d| !is_sunday(d)).count() as u32
}

pub fn sundays_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    days_in_range(start, end).filter(is_sunday).collect()
}

/// `lead_count / number_of_days` with exactly two fractional digits.
///
/// Returns `None` when the quotient is not finite. Rounding is half away from
/// zero on the exact binary value, so `0.125` gives `"0.13"` while `1.005`
/// (stored as 1.00499...) gives `"1.00"`. Quotients too large for `Decimal`
/// are whole numbers and print with `.00`.
pub fn expected_drr(lead_count: f64, number_of_days: u32) -> Option<String> {
    if number_of_days == 0 {
        return None;
    }
    let quotient = lead_count / f64::from(number_of_days);
    if !quotient.is_finite() {
        return None;
    }

    match Decimal::from_f64_retain(quotient) {
        Some(exact) => {
            let mut rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            Some(rounded.to_string())
        }
        None => Some(format!("{:.2}", quotient)),
    }
}

/// Parses a lead count typed into the form. Blank and non-numeric text are
/// rejected, as are `inf`/`NaN` spellings.
pub fn parse_lead_count(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn expected_drr_from_input(lead_count: &str, number_of_days: u32) -> Option<String> {
    parse_lead_count(lead_count).and_then(|n| expected_drr(n, number_of_days))
}

/// Everything the form derives from its three inputs.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrrSummary {
    pub number_of_days: u32,
    pub sundays: Vec<NaiveDate>,
    #[serde(rename = "expectedDRR")]
    pub expected_drr: Option<String>,
}

pub fn summarize(start: NaiveDate, end: NaiveDate, lead_count: &str) -> DrrSummary {
    let number_of_days = count_business_days(start, end);
    DrrSummary {
        number_of_days,
        sundays: sundays_in_range(start, end),
        expected_drr: expected_drr_from_input(lead_count, number_of_days),
    }
}
