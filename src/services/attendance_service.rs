//! Day marking. The core otherwise only reads attendance; this is the one
//! write path, kept status-model aware.

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::db::repositories::attendance_repository::{AttendanceRepository, AttendanceRow};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::attendance::{AttendanceEntry, AttendanceModel, AttendanceRecord, Scope};
use crate::utils::date;

pub struct AttendanceService {
    db: DbPool,
    model: AttendanceModel,
}

impl AttendanceService {
    pub fn new(db: DbPool, model: AttendanceModel) -> Self {
        Self { db, model }
    }

    pub fn model(&self) -> AttendanceModel {
        self.model
    }

    /// Upsert one row per (student, date). Re-marking a day replaces the
    /// previous status. Statuses are validated against the configured model
    /// before anything is written.
    pub fn record_day(
        &self,
        teacher_id: &str,
        class_id: Option<&str>,
        day: NaiveDate,
        entries: &[AttendanceEntry],
    ) -> AppResult<usize> {
        for entry in entries {
            if !self.model.allows(entry.status) {
                return Err(AppError::validation_with_details(
                    "status not allowed by the configured attendance model",
                    serde_json::json!({
                        "studentId": entry.student_id,
                        "status": entry.status.as_str(),
                    }),
                ));
            }
        }

        let conn = self.db.get_connection()?;
        let date_string = date::format_iso(day);
        let now = Utc::now().to_rfc3339();

        for entry in entries {
            let row = AttendanceRow {
                id: Uuid::new_v4().to_string(),
                student_id: entry.student_id.clone(),
                teacher_id: teacher_id.to_string(),
                class_id: class_id.map(str::to_string),
                date: date_string.clone(),
                status: entry.status.as_str().to_string(),
                note: entry.note.clone(),
                created_at: now.clone(),
            };
            AttendanceRepository::upsert(&conn, &row)?;
        }

        info!(
            target: "app::attendance",
            teacher_id,
            date = %date_string,
            marked = entries.len(),
            "attendance recorded"
        );

        Ok(entries.len())
    }

    pub fn list_day(&self, scope: &Scope, day: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        let conn = self.db.get_connection()?;
        let rows = AttendanceRepository::find_by_date(&conn, scope, &day)?;
        rows.into_iter().map(AttendanceRow::into_record).collect()
    }
}
