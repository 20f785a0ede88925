use std::convert::TryFrom;

use chrono::NaiveDate;
use rusqlite::{named_params, Connection, Row};

use crate::error::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, Scope};

#[derive(Debug, Clone)]
pub struct AttendanceRow {
    pub id: String,
    pub student_id: String,
    pub teacher_id: String,
    pub class_id: Option<String>,
    pub date: String,
    pub status: String,
    pub note: Option<String>,
    pub created_at: String,
}

impl AttendanceRow {
    pub fn into_record(self) -> AppResult<AttendanceRecord> {
        let status = AttendanceStatus::parse(&self.status)
            .ok_or_else(|| AppError::database(format!("unknown attendance status: {}", self.status)))?;
        Ok(AttendanceRecord {
            id: self.id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            date: self.date,
            status,
            note: self.note,
        })
    }
}

impl TryFrom<&Row<'_>> for AttendanceRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            student_id: row.get("student_id")?,
            teacher_id: row.get("teacher_id")?,
            class_id: row.get("class_id")?,
            date: row.get("date")?,
            status: row.get("status")?,
            note: row.get("note")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Per-student aggregate produced by the grouped stats query.
#[derive(Debug, Clone)]
pub struct StudentStatsRow {
    pub student_id: String,
    pub student_name: String,
    pub class_id: Option<String>,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub excused_count: i64,
    pub total_records: i64,
}

impl TryFrom<&Row<'_>> for StudentStatsRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            student_id: row.get("student_id")?,
            student_name: row.get("student_name")?,
            class_id: row.get("class_id")?,
            present_count: row.get("present_count")?,
            absent_count: row.get("absent_count")?,
            late_count: row.get("late_count")?,
            excused_count: row.get("excused_count")?,
            total_records: row.get("total_records")?,
        })
    }
}

pub struct AttendanceRepository;

impl AttendanceRepository {
    /// One row per (student, date); re-marking a day replaces the status.
    pub fn upsert(conn: &Connection, row: &AttendanceRow) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO attendance (id, student_id, teacher_id, class_id, date, status, note, created_at)
                VALUES (:id, :student_id, :teacher_id, :class_id, :date, :status, :note, :created_at)
                ON CONFLICT(student_id, date) DO UPDATE SET
                    teacher_id = excluded.teacher_id,
                    class_id = excluded.class_id,
                    status = excluded.status,
                    note = excluded.note
            "#,
            named_params! {
                ":id": &row.id,
                ":student_id": &row.student_id,
                ":teacher_id": &row.teacher_id,
                ":class_id": &row.class_id,
                ":date": &row.date,
                ":status": &row.status,
                ":note": &row.note,
                ":created_at": &row.created_at,
            },
        )?;

        Ok(())
    }

    pub fn find_by_date_range(
        conn: &Connection,
        scope: &Scope,
        start: &NaiveDate,
        end: &NaiveDate,
    ) -> AppResult<Vec<AttendanceRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, student_id, teacher_id, class_id, date, status, note, created_at
            FROM attendance
            WHERE date BETWEEN :start AND :end
              AND (:teacher_id IS NULL OR teacher_id = :teacher_id)
              AND (:class_id IS NULL OR class_id = :class_id)
            ORDER BY date, student_id
        "#,
        )?;

        let rows = stmt
            .query_map(
                named_params! {
                    ":start": start.to_string(),
                    ":end": end.to_string(),
                    ":teacher_id": &scope.teacher_id,
                    ":class_id": &scope.class_id,
                },
                |row| AttendanceRow::try_from(row),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn find_by_date(
        conn: &Connection,
        scope: &Scope,
        date: &NaiveDate,
    ) -> AppResult<Vec<AttendanceRow>> {
        Self::find_by_date_range(conn, scope, date, date)
    }

    /// The Mongo `$match`/`$group` pipeline of the original stats endpoint,
    /// rendered as one grouped query with the student name join. Row order
    /// (display name, then id) is the stable order downstream ranking
    /// relies on.
    pub fn stats_by_student(
        conn: &Connection,
        scope: &Scope,
        start: &NaiveDate,
        end: &NaiveDate,
    ) -> AppResult<Vec<StudentStatsRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT
                s.id AS student_id,
                s.name AS student_name,
                s.class_id AS class_id,
                SUM(CASE WHEN a.status = 'present' THEN 1 ELSE 0 END) AS present_count,
                SUM(CASE WHEN a.status = 'absent' THEN 1 ELSE 0 END) AS absent_count,
                SUM(CASE WHEN a.status = 'late' THEN 1 ELSE 0 END) AS late_count,
                SUM(CASE WHEN a.status = 'excused' THEN 1 ELSE 0 END) AS excused_count,
                COUNT(a.id) AS total_records
            FROM attendance a
            JOIN students s ON s.id = a.student_id
            WHERE a.date BETWEEN :start AND :end
              AND (:teacher_id IS NULL OR a.teacher_id = :teacher_id)
              AND (:class_id IS NULL OR a.class_id = :class_id)
            GROUP BY s.id, s.name, s.class_id
            ORDER BY s.name, s.id
        "#,
        )?;

        let rows = stmt
            .query_map(
                named_params! {
                    ":start": start.to_string(),
                    ":end": end.to_string(),
                    ":teacher_id": &scope.teacher_id,
                    ":class_id": &scope.class_id,
                },
                |row| StudentStatsRow::try_from(row),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
