use serde::{Deserialize, Serialize};

use crate::models::holiday::HolidayRecord;

/// How one date relates to the school week. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDayClassification {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    /// 0=Sunday .. 6=Saturday.
    pub day_of_week: u8,
    pub is_school_day: bool,
    /// True only for the short school day (Friday) when school is open.
    pub is_half_day: bool,
    /// Cause when `is_school_day` is false: the holiday's display name or
    /// the weekly rest day.
    pub reason: Option<String>,
    /// The holiday on this date, if any — attached even when school stays
    /// open so callers can still display it.
    pub holiday: Option<HolidayRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    /// Enrolled students in scope — the denominator, independent of how
    /// many rows were recorded.
    pub total: i64,
    /// Distinct students with any attendance row on this day.
    pub recorded: i64,
}

/// One day of the month view: classification plus attendance counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub day: u32,
    pub day_of_week: u8,
    pub is_school_day: bool,
    pub is_half_day: bool,
    pub reason: Option<String>,
    pub holiday: Option<HolidayRecord>,
    pub attendance: AttendanceSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub total_students: i64,
    pub days: Vec<CalendarDay>,
}

/// A closed day within a queried range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonSchoolDay {
    pub date: String,
    pub reason: String,
    pub holiday: Option<HolidayRecord>,
}
