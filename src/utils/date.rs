//! Calendar-date helpers shared by the resolver and aggregators.
//!
//! Dates move through the core as `NaiveDate` values parsed from
//! `YYYY-MM-DD` strings. Whenever a day-of-week or day-of-month is
//! extracted, the date is first pinned to 12:00: derived values must never
//! depend on a time-of-day or offset boundary.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{AppError, AppResult};

const MIDDAY_HOUR: u32 = 12;

pub const SUNDAY: u8 = 0;
pub const FRIDAY: u8 = 5;
pub const SATURDAY: u8 = 6;

/// Strict `YYYY-MM-DD` parse; anything else is a client error.
pub fn parse_iso_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("invalid date: {value}, expected YYYY-MM-DD")))
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The date fixed to mid-day.
pub fn pin_midday(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(MIDDAY_HOUR, 0, 0).unwrap()
}

/// Day of week in the local school convention, 0=Sunday .. 6=Saturday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    pin_midday(date).weekday().num_days_from_sunday() as u8
}

/// Day of month, read off the pinned datetime like every other day field.
pub fn day_of_month(date: NaiveDate) -> u32 {
    pin_midday(date).day()
}

/// First and last day of a calendar month. Rejects months outside 1..=12
/// and years chrono cannot represent.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation_with_details(
            "month out of range",
            serde_json::json!({ "month": month }),
        ));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("invalid year/month: {year}-{month:02}")))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation(format!("invalid year/month: {year}-{month:02}")))?;
    let last = next_first.pred_opt().unwrap();
    Ok((first, last))
}

pub fn days_in_month(year: i32, month: u32) -> AppResult<u32> {
    let (_, last) = month_bounds(year, month)?;
    Ok(last.day())
}
