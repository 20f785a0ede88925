use std::convert::TryFrom;

use chrono::NaiveDate;
use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::AppResult;
use crate::models::holiday::HolidayRecord;

#[derive(Debug, Clone)]
pub struct HolidayRow {
    pub date: String,
    pub name: String,
    pub hebrew_name: String,
    pub year: i32,
    pub is_school_holiday: bool,
}

impl HolidayRow {
    pub fn from_record(record: &HolidayRecord) -> Self {
        Self {
            date: record.date.clone(),
            name: record.name.clone(),
            hebrew_name: record.hebrew_name.clone(),
            year: record.year,
            is_school_holiday: record.is_school_holiday,
        }
    }

    pub fn into_record(self) -> HolidayRecord {
        HolidayRecord {
            date: self.date,
            name: self.name,
            hebrew_name: self.hebrew_name,
            year: self.year,
            is_school_holiday: self.is_school_holiday,
        }
    }
}

impl TryFrom<&Row<'_>> for HolidayRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            date: row.get("date")?,
            name: row.get("name")?,
            hebrew_name: row.get("hebrew_name")?,
            year: row.get("year")?,
            is_school_holiday: row.get("is_school_holiday")?,
        })
    }
}

pub struct HolidayRepository;

impl HolidayRepository {
    /// First-write-wins insert keyed by `date`. A row already present —
    /// including one written by a concurrent cache fill — leaves the table
    /// unchanged and is not an error.
    pub fn insert_if_absent(conn: &Connection, row: &HolidayRow) -> AppResult<bool> {
        let inserted = conn.execute(
            r#"
                INSERT OR IGNORE INTO holidays (date, name, hebrew_name, year, is_school_holiday)
                VALUES (:date, :name, :hebrew_name, :year, :is_school_holiday)
            "#,
            named_params! {
                ":date": &row.date,
                ":name": &row.name,
                ":hebrew_name": &row.hebrew_name,
                ":year": &row.year,
                ":is_school_holiday": &row.is_school_holiday,
            },
        )?;

        Ok(inserted > 0)
    }

    pub fn find_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Option<HolidayRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT date, name, hebrew_name, year, is_school_holiday
            FROM holidays
            WHERE date = ?1
        "#,
        )?;

        let row = stmt
            .query_row([date.to_string()], |row| HolidayRow::try_from(row))
            .optional()?;

        Ok(row)
    }

    pub fn find_by_range(
        conn: &Connection,
        start: &NaiveDate,
        end: &NaiveDate,
    ) -> AppResult<Vec<HolidayRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT date, name, hebrew_name, year, is_school_holiday
            FROM holidays
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date
        "#,
        )?;

        let rows = stmt
            .query_map([start.to_string(), end.to_string()], |row| {
                HolidayRow::try_from(row)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn find_by_year(conn: &Connection, year: i32) -> AppResult<Vec<HolidayRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT date, name, hebrew_name, year, is_school_holiday
            FROM holidays
            WHERE year = ?1
            ORDER BY date
        "#,
        )?;

        let rows = stmt
            .query_map([year], |row| HolidayRow::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn count_by_year(conn: &Connection, year: i32) -> AppResult<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM holidays WHERE year = ?1",
            [year],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
