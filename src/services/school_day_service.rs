//! School-day classification.
//!
//! Precedence: the weekly rest day beats everything, then a school-closing
//! holiday, then an observed-but-open holiday (attached for display), then
//! the Friday half day. An empty holiday cache therefore degrades to plain
//! weekend rules.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::error::{AppError, AppResult};
use crate::models::calendar::{NonSchoolDay, SchoolDayClassification};
use crate::models::holiday::HolidayRecord;
use crate::services::holiday_service::HolidayService;
use crate::utils::date;

pub const WEEKLY_REST_REASON: &str = "weekly rest day";

pub struct SchoolDayService {
    holidays: Arc<HolidayService>,
}

impl SchoolDayService {
    pub fn new(holidays: Arc<HolidayService>) -> Self {
        Self { holidays }
    }

    pub fn classify(&self, day: NaiveDate) -> AppResult<SchoolDayClassification> {
        self.holidays.ensure_year(day.year())?;
        let holiday = self.holidays.holiday_on(day)?;
        Ok(Self::classify_with_holiday(day, holiday))
    }

    pub fn classify_str(&self, value: &str) -> AppResult<SchoolDayClassification> {
        self.classify(date::parse_iso_date(value)?)
    }

    /// Pure classification core. Month-granularity callers fetch the
    /// holiday range once and feed each day through here instead of doing
    /// one store lookup per day.
    pub fn classify_with_holiday(
        day: NaiveDate,
        holiday: Option<HolidayRecord>,
    ) -> SchoolDayClassification {
        let day_of_week = date::day_of_week(day);
        let date_string = date::format_iso(day);

        if day_of_week == date::SATURDAY {
            return SchoolDayClassification {
                date: date_string,
                day_of_week,
                is_school_day: false,
                is_half_day: false,
                reason: Some(WEEKLY_REST_REASON.to_string()),
                holiday: None,
            };
        }

        match holiday {
            Some(record) if record.is_school_holiday => {
                let reason = if record.hebrew_name.is_empty() {
                    record.name.clone()
                } else {
                    record.hebrew_name.clone()
                };
                SchoolDayClassification {
                    date: date_string,
                    day_of_week,
                    is_school_day: false,
                    is_half_day: false,
                    reason: Some(reason),
                    holiday: Some(record),
                }
            }
            Some(record) => SchoolDayClassification {
                date: date_string,
                day_of_week,
                is_school_day: true,
                is_half_day: false,
                reason: None,
                holiday: Some(record),
            },
            None => {
                let is_half_day = day_of_week == date::FRIDAY;
                SchoolDayClassification {
                    date: date_string,
                    day_of_week,
                    is_school_day: true,
                    is_half_day,
                    reason: None,
                    holiday: None,
                }
            }
        }
    }

    /// The closed days of a range, with reasons.
    pub fn non_school_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<NonSchoolDay>> {
        if start > end {
            return Err(AppError::validation("start date is after end date"));
        }

        for year in start.year()..=end.year() {
            self.holidays.ensure_year(year)?;
        }

        let holidays = self.holidays.holidays_in_range(start, end)?;
        let mut by_date = std::collections::HashMap::new();
        for record in holidays {
            by_date.insert(record.date.clone(), record);
        }

        let mut closed = Vec::new();
        for day in start.iter_days().take_while(|day| *day <= end) {
            let date_string = date::format_iso(day);
            let classification =
                Self::classify_with_holiday(day, by_date.get(&date_string).cloned());
            if !classification.is_school_day {
                closed.push(NonSchoolDay {
                    date: classification.date,
                    reason: classification.reason.unwrap_or_default(),
                    holiday: classification.holiday,
                });
            }
        }

        Ok(closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greg(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn holiday(date: &str, closes: bool) -> HolidayRecord {
        HolidayRecord {
            date: date.to_string(),
            name: "Yom Kippur".to_string(),
            hebrew_name: "יום כיפור".to_string(),
            year: 2026,
            is_school_holiday: closes,
        }
    }

    #[test]
    fn saturday_beats_holidays() {
        // 2026-09-12 is both Shabbat and Rosh Hashana I.
        let classification =
            SchoolDayService::classify_with_holiday(greg(2026, 9, 12), Some(holiday("2026-09-12", true)));
        assert!(!classification.is_school_day);
        assert_eq!(classification.reason.as_deref(), Some(WEEKLY_REST_REASON));
        assert!(classification.holiday.is_none());
    }

    #[test]
    fn closing_holiday_closes_school() {
        let classification =
            SchoolDayService::classify_with_holiday(greg(2026, 9, 21), Some(holiday("2026-09-21", true)));
        assert!(!classification.is_school_day);
        assert!(!classification.is_half_day);
        assert_eq!(classification.reason.as_deref(), Some("יום כיפור"));
        assert!(classification.holiday.unwrap().is_school_holiday);
    }

    #[test]
    fn observed_holiday_keeps_school_open() {
        let classification =
            SchoolDayService::classify_with_holiday(greg(2025, 12, 16), Some(holiday("2025-12-16", false)));
        assert!(classification.is_school_day);
        assert!(classification.reason.is_none());
        assert!(!classification.holiday.unwrap().is_school_holiday);
    }

    #[test]
    fn friday_is_a_half_day() {
        let classification = SchoolDayService::classify_with_holiday(greg(2026, 1, 2), None);
        assert!(classification.is_school_day);
        assert!(classification.is_half_day);
        assert_eq!(classification.day_of_week, date::FRIDAY);
    }

    #[test]
    fn midweek_is_ordinary() {
        let classification = SchoolDayService::classify_with_holiday(greg(2026, 1, 6), None);
        assert!(classification.is_school_day);
        assert!(!classification.is_half_day);
        assert!(classification.reason.is_none());
        assert!(classification.holiday.is_none());
    }
}
