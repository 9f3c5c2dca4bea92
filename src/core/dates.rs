//! Report date helpers
//!
//! Dates travel through the editor as ISO `YYYY-MM-DD` strings (the value of a date
//! input). Only that exact shape is accepted; anything else is treated as "no date".

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Placeholder printed where a date is expected but missing
pub const MISSING_DATE: &str = "____";

/// Parse a strict `YYYY-MM-DD` string
///
/// ```
/// use informe::core::dates::parse_iso_date;
///
/// assert!(parse_iso_date("2024-06-15").is_some());
/// assert!(parse_iso_date("2024-6-15").is_none());
/// assert!(parse_iso_date("2024-02-30").is_none());
/// ```
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !is_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Whether the value has the `YYYY-MM-DD` shape
pub fn is_iso_date(value: &str) -> bool {
    static ISO_DATE: OnceLock<Regex> = OnceLock::new();
    ISO_DATE
        .get_or_init(|| {
            Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("hard-coded pattern is valid")
        })
        .is_match(value)
}

/// `dd/mm/yy`, or [`MISSING_DATE`] when the value is not an ISO date
pub fn format_date_dmy(value: &str) -> String {
    match parse_iso_date(value) {
        Some(date) => format!(
            "{:02}/{:02}/{:02}",
            date.day(),
            date.month(),
            date.year().rem_euclid(100)
        ),
        None => MISSING_DATE.to_string(),
    }
}

/// `dd-mm-yy` form used in printed file names
pub fn format_dmy_dashed(date: NaiveDate) -> String {
    format!(
        "{:02}-{:02}-{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Age in whole years at `reference`
///
/// Returns `None` when the birth date is not an ISO date. A missing or malformed
/// reference date falls back to `today`. The result never goes below zero.
///
/// ```
/// use informe::core::dates::calculate_age;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
/// assert_eq!(calculate_age("1990-06-15", "2024-06-14", today), Some(33));
/// assert_eq!(calculate_age("1990-06-15", "2024-06-15", today), Some(34));
/// ```
pub fn calculate_age(birth: &str, reference: &str, today: NaiveDate) -> Option<u32> {
    let birth = parse_iso_date(birth)?;
    let reference = parse_iso_date(reference).unwrap_or(today);

    let mut age = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age.max(0) as u32)
}
