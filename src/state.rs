//! Service wiring and the library's outward operations.
//!
//! Everything is dependency-injected from one [`DbPool`]; the HTTP layer
//! (out of tree) holds a single `AppState` and maps routes onto these
//! methods. All outputs are plain serde-serializable data with dates as
//! `YYYY-MM-DD` strings.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::repositories::student_repository::{StudentRepository, StudentRow};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::attendance::{AttendanceEntry, AttendanceModel, AttendanceRecord, Scope};
use crate::models::calendar::{MonthCalendar, NonSchoolDay, SchoolDayClassification};
use crate::models::holiday::{HolidayRecord, HolidaySummary};
use crate::models::stats::{StatRow, StatsOverview};
use crate::models::student::{NewStudent, Student};
use crate::services::attendance_service::AttendanceService;
use crate::services::calendar_service::CalendarService;
use crate::services::holiday_service::HolidayService;
use crate::services::school_day_service::SchoolDayService;
use crate::services::stats_service::StatsService;
use crate::utils::date;

#[derive(Clone)]
pub struct AppState {
    db_pool: DbPool,
    holiday_service: Arc<HolidayService>,
    school_day_service: Arc<SchoolDayService>,
    calendar_service: Arc<CalendarService>,
    stats_service: Arc<StatsService>,
    attendance_service: Arc<AttendanceService>,
}

impl AppState {
    pub fn new(db_pool: DbPool) -> AppResult<Self> {
        Self::with_model(db_pool, AttendanceModel::default())
    }

    /// The attendance model is resolved exactly once, here.
    pub fn with_model(db_pool: DbPool, model: AttendanceModel) -> AppResult<Self> {
        let holiday_service = Arc::new(HolidayService::new(db_pool.clone()));
        let school_day_service = Arc::new(SchoolDayService::new(Arc::clone(&holiday_service)));
        let calendar_service = Arc::new(CalendarService::new(
            db_pool.clone(),
            Arc::clone(&holiday_service),
        ));
        let stats_service = Arc::new(StatsService::new(db_pool.clone()));
        let attendance_service = Arc::new(AttendanceService::new(db_pool.clone(), model));

        Ok(Self {
            db_pool,
            holiday_service,
            school_day_service,
            calendar_service,
            stats_service,
            attendance_service,
        })
    }

    pub fn db_pool(&self) -> &DbPool {
        &self.db_pool
    }

    pub fn attendance_model(&self) -> AttendanceModel {
        self.attendance_service.model()
    }

    // Calendar queries

    pub fn calendar_month(&self, year: i32, month: u32, scope: &Scope) -> AppResult<MonthCalendar> {
        self.calendar_service.build_month(year, month, scope)
    }

    pub fn check_school_day(&self, date: &str) -> AppResult<SchoolDayClassification> {
        self.school_day_service.classify_str(date)
    }

    pub fn non_school_days(&self, start: &str, end: &str) -> AppResult<Vec<NonSchoolDay>> {
        let start = date::parse_iso_date(start)?;
        let end = date::parse_iso_date(end)?;
        self.school_day_service.non_school_days(start, end)
    }

    // Holiday queries

    pub fn holidays_for_year(&self, year: i32) -> AppResult<Vec<HolidayRecord>> {
        self.holiday_service.holidays_for_year(year)
    }

    pub fn holidays_for_month(&self, year: i32, month: u32) -> AppResult<Vec<HolidaySummary>> {
        self.holiday_service.holidays_for_month(year, month)
    }

    // Statistics

    pub fn attendance_stats(
        &self,
        start: &str,
        end: &str,
        scope: &Scope,
    ) -> AppResult<Vec<StatRow>> {
        let start = date::parse_iso_date(start)?;
        let end = date::parse_iso_date(end)?;
        self.stats_service.build_stats(start, end, scope)
    }

    pub fn attendance_overview(
        &self,
        start: &str,
        end: &str,
        scope: &Scope,
    ) -> AppResult<StatsOverview> {
        let start = date::parse_iso_date(start)?;
        let end = date::parse_iso_date(end)?;
        self.stats_service.overview(start, end, scope)
    }

    // Attendance recording

    pub fn record_attendance(
        &self,
        teacher_id: &str,
        class_id: Option<&str>,
        date: &str,
        entries: &[AttendanceEntry],
    ) -> AppResult<usize> {
        let day = date::parse_iso_date(date)?;
        self.attendance_service
            .record_day(teacher_id, class_id, day, entries)
    }

    pub fn attendance_for_day(&self, scope: &Scope, date: &str) -> AppResult<Vec<AttendanceRecord>> {
        let day = date::parse_iso_date(date)?;
        self.attendance_service.list_day(scope, day)
    }

    // Students (the enrollment side the aggregators count against)

    pub fn enroll_student(&self, new_student: NewStudent) -> AppResult<Student> {
        let row = StudentRow {
            id: Uuid::new_v4().to_string(),
            name: new_student.name,
            teacher_id: new_student.teacher_id,
            class_id: new_student.class_id,
            active: true,
            created_at: Utc::now().to_rfc3339(),
        };
        let conn = self.db_pool.get_connection()?;
        StudentRepository::insert(&conn, &row)?;
        Ok(row.into_record())
    }

    pub fn students(&self, scope: &Scope) -> AppResult<Vec<Student>> {
        let conn = self.db_pool.get_connection()?;
        let rows = StudentRepository::find_by_scope(&conn, scope)?;
        Ok(rows.into_iter().map(StudentRow::into_record).collect())
    }
}
