//! Month view: school-day classification merged with attendance counts.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Datelike;
use tracing::debug;

use crate::db::repositories::attendance_repository::{AttendanceRepository, AttendanceRow};
use crate::db::repositories::holiday_repository::HolidayRepository;
use crate::db::repositories::student_repository::StudentRepository;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::attendance::{AttendanceStatus, Scope};
use crate::models::calendar::{AttendanceSummary, CalendarDay, MonthCalendar};
use crate::models::holiday::HolidayRecord;
use crate::services::holiday_service::HolidayService;
use crate::services::school_day_service::SchoolDayService;
use crate::utils::date;

pub struct CalendarService {
    db: DbPool,
    holidays: Arc<HolidayService>,
}

impl CalendarService {
    pub fn new(db: DbPool, holidays: Arc<HolidayService>) -> Self {
        Self { db, holidays }
    }

    /// One record per calendar day of the month. The attendance and holiday
    /// tables are each hit once for the whole month; the enrolled count is
    /// its own query because unrecorded students still belong in the
    /// denominator. An empty scope is a legitimate empty month, not an error.
    pub fn build_month(&self, year: i32, month: u32, scope: &Scope) -> AppResult<MonthCalendar> {
        let (first, last) = date::month_bounds(year, month)?;
        self.holidays.ensure_year(year)?;

        let conn = self.db.get_connection()?;
        let total_students = StudentRepository::count_enrolled(&conn, scope)?;
        let attendance_rows = AttendanceRepository::find_by_date_range(&conn, scope, &first, &last)?;
        let holidays: HashMap<String, HolidayRecord> =
            HolidayRepository::find_by_range(&conn, &first, &last)?
                .into_iter()
                .map(|row| (row.date.clone(), row.into_record()))
                .collect();

        let mut rows_by_day: HashMap<u32, Vec<&AttendanceRow>> = HashMap::new();
        for row in &attendance_rows {
            let day = date::day_of_month(date::parse_iso_date(&row.date)?);
            rows_by_day.entry(day).or_default().push(row);
        }

        let mut days = Vec::with_capacity(last.day() as usize);
        for current in first.iter_days().take_while(|day| *day <= last) {
            let date_string = date::format_iso(current);
            let day_number = date::day_of_month(current);
            let classification = SchoolDayService::classify_with_holiday(
                current,
                holidays.get(&date_string).cloned(),
            );

            let attendance = summarize_day(
                rows_by_day.get(&day_number).map(Vec::as_slice).unwrap_or(&[]),
                total_students,
            );

            days.push(CalendarDay {
                date: classification.date,
                day: day_number,
                day_of_week: classification.day_of_week,
                is_school_day: classification.is_school_day,
                is_half_day: classification.is_half_day,
                reason: classification.reason,
                holiday: classification.holiday,
                attendance,
            });
        }

        debug!(
            target: "app::calendar",
            year,
            month,
            total_students,
            recorded_rows = attendance_rows.len(),
            "month calendar built"
        );

        Ok(MonthCalendar {
            year,
            month,
            total_students,
            days,
        })
    }
}

fn summarize_day(rows: &[&AttendanceRow], total_students: i64) -> AttendanceSummary {
    let mut summary = AttendanceSummary {
        total: total_students,
        ..AttendanceSummary::default()
    };

    let mut recorded_students: HashSet<&str> = HashSet::new();
    for row in rows {
        recorded_students.insert(row.student_id.as_str());
        match AttendanceStatus::parse(&row.status) {
            Some(AttendanceStatus::Present) => summary.present += 1,
            Some(AttendanceStatus::Absent) => summary.absent += 1,
            Some(AttendanceStatus::Late) => summary.late += 1,
            Some(AttendanceStatus::Excused) => summary.excused += 1,
            None => {}
        }
    }
    summary.recorded = recorded_students.len() as i64;

    summary
}
