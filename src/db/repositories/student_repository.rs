use std::convert::TryFrom;

use rusqlite::{named_params, Connection, Row};

use crate::error::AppResult;
use crate::models::attendance::Scope;
use crate::models::student::Student;

#[derive(Debug, Clone)]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub teacher_id: String,
    pub class_id: Option<String>,
    pub active: bool,
    pub created_at: String,
}

impl StudentRow {
    pub fn into_record(self) -> Student {
        Student {
            id: self.id,
            name: self.name,
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            active: self.active,
        }
    }
}

impl TryFrom<&Row<'_>> for StudentRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            teacher_id: row.get("teacher_id")?,
            class_id: row.get("class_id")?,
            active: row.get("active")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct StudentRepository;

impl StudentRepository {
    pub fn insert(conn: &Connection, row: &StudentRow) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO students (id, name, teacher_id, class_id, active, created_at)
                VALUES (:id, :name, :teacher_id, :class_id, :active, :created_at)
            "#,
            named_params! {
                ":id": &row.id,
                ":name": &row.name,
                ":teacher_id": &row.teacher_id,
                ":class_id": &row.class_id,
                ":active": &row.active,
                ":created_at": &row.created_at,
            },
        )?;

        Ok(())
    }

    /// Enrolled-student count for a scope — the attendance denominator.
    /// Deliberately independent of attendance rows: unrecorded students
    /// still count.
    pub fn count_enrolled(conn: &Connection, scope: &Scope) -> AppResult<i64> {
        let count = conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM students
            WHERE active = 1
              AND (:teacher_id IS NULL OR teacher_id = :teacher_id)
              AND (:class_id IS NULL OR class_id = :class_id)
        "#,
            named_params! {
                ":teacher_id": &scope.teacher_id,
                ":class_id": &scope.class_id,
            },
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn find_by_scope(conn: &Connection, scope: &Scope) -> AppResult<Vec<StudentRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, teacher_id, class_id, active, created_at
            FROM students
            WHERE active = 1
              AND (:teacher_id IS NULL OR teacher_id = :teacher_id)
              AND (:class_id IS NULL OR class_id = :class_id)
            ORDER BY name, id
        "#,
        )?;

        let rows = stmt
            .query_map(
                named_params! {
                    ":teacher_id": &scope.teacher_id,
                    ":class_id": &scope.class_id,
                },
                |row| StudentRow::try_from(row),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
